//! Budgets module - domain models, allocation rules, services, and traits.

mod budgets_errors;
mod budgets_model;
mod budgets_service;
mod budgets_traits;
pub mod budgets_validator;

pub use budgets_errors::BudgetError;
pub use budgets_model::{AllocationCheck, Budget, BudgetInput, BudgetUpsertResult, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
pub use budgets_validator::check_allocation;
