use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::budgets_errors::BudgetError;
use super::budgets_model::{AllocationCheck, BudgetUpsertResult, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use super::budgets_validator::check_allocation;
use crate::errors::Result;
use crate::income::IncomeResolverTrait;

/// Service for managing budgets against a user's monthly income
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    income_resolver: Arc<dyn IncomeResolverTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        income_resolver: Arc<dyn IncomeResolverTrait>,
    ) -> Self {
        BudgetService {
            repository,
            income_resolver,
        }
    }

    /// Resolves income and checks the proposed limit against the current budget set.
    fn precheck(&self, new_budget: &NewBudget) -> Result<(Decimal, AllocationCheck)> {
        let monthly_income = self
            .income_resolver
            .resolve_monthly_income(&new_budget.user_id)?;
        if monthly_income <= Decimal::ZERO {
            return Err(BudgetError::NoIncomeSet.into());
        }

        let existing = self
            .repository
            .find_by_category(&new_budget.user_id, &new_budget.category)?;
        let budgets = self.repository.list_by_user(&new_budget.user_id)?;
        let editing_id = existing.as_ref().map(|b| b.id.as_str());

        let check = check_allocation(monthly_income, &budgets, editing_id, new_budget.limit)?;
        Ok((monthly_income, check))
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn validate_budget(&self, new_budget: &NewBudget) -> Result<AllocationCheck> {
        let (_, check) = self.precheck(new_budget)?;
        Ok(check)
    }

    async fn upsert_budget(&self, new_budget: NewBudget) -> Result<BudgetUpsertResult> {
        let (monthly_income, check) = match self.precheck(&new_budget) {
            Ok(result) => result,
            Err(e) => {
                debug!(
                    "Rejected budget '{}' for user {}: {}",
                    new_budget.category, new_budget.user_id, e
                );
                return Err(e);
            }
        };
        debug!(
            "Budget '{}' for user {} fits: available {}, other budgets {}",
            new_budget.category, new_budget.user_id, check.available, check.other_total
        );

        let result = self
            .repository
            .upsert_within_income(new_budget, monthly_income)
            .await?;

        info!(
            "{} budget '{}' for user {} with limit {}",
            if result.created { "Created" } else { "Updated" },
            result.budget.category,
            result.budget.user_id,
            result.budget.limit
        );
        Ok(result)
    }

    fn get_budget_limits(&self, user_id: &str) -> Result<HashMap<String, Decimal>> {
        let budgets = self.repository.list_by_user(user_id)?;
        Ok(budgets.into_iter().map(|b| (b.category, b.limit)).collect())
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<()> {
        let deleted = self.repository.delete_by_id(budget_id).await?;
        if deleted == 0 {
            debug!("Budget {} already absent", budget_id);
        }
        Ok(())
    }

    async fn delete_budget_by_category(&self, user_id: &str, category: &str) -> Result<usize> {
        let category = category.trim();
        let deleted = self.repository.delete_by_category(user_id, category).await?;
        if deleted == 0 {
            return Err(BudgetError::NotFound {
                category: category.to_string(),
            }
            .into());
        }
        if deleted > 1 {
            warn!(
                "Deleted {} budgets for user {} and category '{}'",
                deleted, user_id, category
            );
        }
        Ok(deleted)
    }
}
