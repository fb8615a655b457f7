//! Budget repository and service traits.
//!
//! These traits define the contract for budget operations without any
//! database-specific types, allowing for different storage implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::budgets_model::{AllocationCheck, Budget, BudgetUpsertResult, NewBudget};
use crate::errors::Result;

/// Trait defining the contract for Budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Lists every budget owned by the user.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// Finds the user's budget for an exact (already trimmed) category.
    fn find_by_category(&self, user_id: &str, category: &str) -> Result<Option<Budget>>;

    /// Creates or updates the budget for `(user_id, category)`.
    ///
    /// The user's budgets are re-read and the allocation check re-run against
    /// `monthly_income` inside the same transaction as the write, so two
    /// concurrent upserts cannot both pass against a stale total.
    async fn upsert_within_income(
        &self,
        new_budget: NewBudget,
        monthly_income: Decimal,
    ) -> Result<BudgetUpsertResult>;

    /// Deletes a budget by id. Returns the number of deleted records.
    async fn delete_by_id(&self, budget_id: &str) -> Result<usize>;

    /// Deletes every budget matching `(user_id, category)`.
    /// Returns the number of deleted records.
    async fn delete_by_category(&self, user_id: &str, category: &str) -> Result<usize>;
}

/// Trait defining the contract for Budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Runs the allocation check for a proposed budget without writing anything.
    fn validate_budget(&self, new_budget: &NewBudget) -> Result<AllocationCheck>;

    /// Validates and persists a budget, creating it on first use of the category.
    async fn upsert_budget(&self, new_budget: NewBudget) -> Result<BudgetUpsertResult>;

    /// Returns the user's budgets keyed by category.
    fn get_budget_limits(&self, user_id: &str) -> Result<HashMap<String, Decimal>>;

    /// Deletes a budget by id. Succeeds when the budget is already gone.
    async fn delete_budget(&self, budget_id: &str) -> Result<()>;

    /// Deletes the user's budget for a category; fails with `NotFound` if there is none.
    async fn delete_budget_by_category(&self, user_id: &str, category: &str) -> Result<usize>;
}
