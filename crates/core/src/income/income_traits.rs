use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;

/// Resolves a user's effective monthly income.
pub trait IncomeResolverTrait: Send + Sync {
    /// Monthly income as of today (UTC).
    fn resolve_monthly_income(&self, user_id: &str) -> Result<Decimal>;

    /// Monthly income for the calendar month containing `today`.
    ///
    /// Never negative; zero when neither a declared salary nor
    /// current-month income transactions yield a positive amount.
    fn resolve_monthly_income_for_date(&self, user_id: &str, today: NaiveDate) -> Result<Decimal>;
}
