//! Budget progress read models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::month_bounds;

/// Inclusive date window progress is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SpendingWindow {
    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let (start_date, end_date) = month_bounds(date);
        Self {
            start_date,
            end_date,
        }
    }

    /// Fills in missing bounds from the calendar month containing `today`.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let month = Self::month_of(today);
        Self {
            start_date: start.unwrap_or(month.start_date),
            end_date: end.unwrap_or(month.end_date),
        }
    }
}

/// A single expense with the running total of its category.
///
/// `budget_limit` and `percent_used` are absent for the default category
/// and for categories without a budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProgress {
    pub transaction_id: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub cumulative_amount: Decimal,
    pub budget_limit: Option<Decimal>,
    pub percent_used: Option<Decimal>,
}

/// Total spend of one category over the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category: String,
    pub spent: Decimal,
    pub budget_limit: Option<Decimal>,
    pub percent_used: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub user_id: String,
    pub window: SpendingWindow,
    pub transactions: Vec<TransactionProgress>,
    pub categories: Vec<CategoryProgress>,
}
