use super::spending_model::{BudgetProgress, SpendingWindow};
use crate::errors::Result;

/// Trait defining the contract for budget progress queries.
pub trait SpendingServiceTrait: Send + Sync {
    /// Attributes the user's expenses within `window` and joins their budget limits.
    fn get_budget_progress(&self, user_id: &str, window: SpendingWindow) -> Result<BudgetProgress>;
}
