//! Income module - resolves the monthly income budgets are constrained by.

mod income_service;
mod income_traits;

pub use income_service::{parse_salary, IncomeService};
pub use income_traits::IncomeResolverTrait;
