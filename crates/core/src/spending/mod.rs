//! Spending module - per-transaction spend attribution and budget progress.

mod spending_attribution;
mod spending_model;
mod spending_service;
mod spending_traits;

pub use spending_attribution::{attribute_cumulative_spend, budget_usage_percent};
pub use spending_model::{BudgetProgress, CategoryProgress, SpendingWindow, TransactionProgress};
pub use spending_service::SpendingService;
pub use spending_traits::SpendingServiceTrait;
