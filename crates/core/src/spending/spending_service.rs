use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::spending_attribution::{budget_usage_percent, cumulative_runs};
use super::spending_model::{BudgetProgress, CategoryProgress, SpendingWindow, TransactionProgress};
use super::spending_traits::SpendingServiceTrait;
use crate::budgets::BudgetRepositoryTrait;
use crate::constants::DEFAULT_CATEGORY;
use crate::errors::Result;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};

/// Computes budget progress from the transaction and budget stores.
pub struct SpendingService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl SpendingService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        SpendingService {
            transaction_repository,
            budget_repository,
        }
    }

    fn limit_for(limits: &HashMap<String, Decimal>, category: &str) -> Option<Decimal> {
        if category == DEFAULT_CATEGORY {
            return None;
        }
        limits.get(category).copied()
    }
}

impl SpendingServiceTrait for SpendingService {
    fn get_budget_progress(&self, user_id: &str, window: SpendingWindow) -> Result<BudgetProgress> {
        let filter = TransactionFilter::of_type(TransactionType::Expense)
            .between(window.start_date, window.end_date);
        let transactions = self
            .transaction_repository
            .get_transactions(user_id, &filter)?;
        let limits: HashMap<String, Decimal> = self
            .budget_repository
            .list_by_user(user_id)?
            .into_iter()
            .map(|b| (b.category, b.limit))
            .collect();

        debug!(
            "Computing progress for user {} over {} expenses ({} to {})",
            user_id,
            transactions.len(),
            window.start_date,
            window.end_date
        );

        let mut rows = Vec::with_capacity(transactions.len());
        let mut categories = Vec::new();

        for run in cumulative_runs(&transactions) {
            let budget_limit = Self::limit_for(&limits, run.category);
            let spent = run.total();
            for (transaction, cumulative_amount) in &run.entries {
                rows.push(TransactionProgress {
                    transaction_id: transaction.id.clone(),
                    category: run.category.to_string(),
                    amount: transaction.amount,
                    date: transaction.date,
                    cumulative_amount: *cumulative_amount,
                    budget_limit,
                    percent_used: budget_limit
                        .map(|limit| budget_usage_percent(*cumulative_amount, limit)),
                });
            }
            categories.push(CategoryProgress {
                category: run.category.to_string(),
                spent,
                budget_limit,
                percent_used: budget_limit.map(|limit| budget_usage_percent(spent, limit)),
            });
        }

        Ok(BudgetProgress {
            user_id: user_id.to_string(),
            window,
            transactions: rows,
            categories,
        })
    }
}
