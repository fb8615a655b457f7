use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::income_traits::IncomeResolverTrait;
use crate::errors::Result;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};
use crate::users::UserRepositoryTrait;
use crate::utils::{month_bounds, today_utc};

/// Parses a declared salary string, ignoring digit grouping characters.
///
/// Returns `None` when the value is blank, unparseable, or not positive,
/// all of which mean "no salary set".
pub fn parse_salary(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}' | '\u{202f}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|salary| *salary > Decimal::ZERO)
}

/// Income resolver backed by the user and transaction stores.
pub struct IncomeService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl IncomeService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        IncomeService {
            user_repository,
            transaction_repository,
        }
    }

    fn declared_salary(&self, user_id: &str) -> Result<Option<Decimal>> {
        let user = self.user_repository.get_user(user_id)?;
        Ok(user
            .and_then(|u| u.salary)
            .as_deref()
            .and_then(parse_salary))
    }

    fn income_transactions_total(&self, user_id: &str, today: NaiveDate) -> Result<Decimal> {
        let (first_day, last_day) = month_bounds(today);
        let filter = TransactionFilter::of_type(TransactionType::Income).between(first_day, last_day);
        let transactions = self
            .transaction_repository
            .get_transactions(user_id, &filter)?;

        // Saturates at Decimal::MAX
        Ok(transactions
            .iter()
            .filter(|t| t.amount > Decimal::ZERO)
            .fold(Decimal::ZERO, |total, t| total.saturating_add(t.amount)))
    }
}

impl IncomeResolverTrait for IncomeService {
    fn resolve_monthly_income(&self, user_id: &str) -> Result<Decimal> {
        self.resolve_monthly_income_for_date(user_id, today_utc())
    }

    fn resolve_monthly_income_for_date(&self, user_id: &str, today: NaiveDate) -> Result<Decimal> {
        if let Some(salary) = self.declared_salary(user_id)? {
            debug!("Resolved income for user {} from declared salary", user_id);
            return Ok(salary);
        }

        let total = self.income_transactions_total(user_id, today)?;
        debug!(
            "Resolved income for user {} from {} income transactions: {}",
            user_id,
            today.format("%Y-%m"),
            total
        );
        Ok(total.max(Decimal::ZERO))
    }
}
