use rust_decimal::Decimal;
use thiserror::Error;

use crate::constants::{MAX_CATEGORY_LENGTH, MIN_CATEGORY_LENGTH};
use crate::utils::format_inr;

fn inr(amount: &Decimal) -> String {
    format_inr(*amount)
}

/// Budget rule violations. All of these are detected before any write.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Budget limit must be a positive number")]
    InvalidLimit,

    #[error(
        "Category must be between {} and {} characters (got {length})",
        MIN_CATEGORY_LENGTH,
        MAX_CATEGORY_LENGTH
    )]
    InvalidCategoryLength { length: usize },

    #[error(
        "Please set your monthly salary or add income transactions for this month before creating budgets"
    )]
    NoIncomeSet,

    #[error(
        "Budget limit exceeds available income. Maximum allowed: {}",
        inr(.available)
    )]
    LimitExceedsAvailable {
        available: Decimal,
        monthly_income: Decimal,
    },

    #[error(
        "Total budgets would exceed your monthly income of {}. Maximum allowed: {}",
        inr(.monthly_income),
        inr(.available)
    )]
    TotalExceedsIncome {
        available: Decimal,
        monthly_income: Decimal,
    },

    #[error("No budget found for category '{category}'")]
    NotFound { category: String },
}

impl BudgetError {
    /// Remaining headroom to report alongside allocation failures.
    pub fn available(&self) -> Option<Decimal> {
        match self {
            BudgetError::NoIncomeSet => Some(Decimal::ZERO),
            BudgetError::LimitExceedsAvailable { available, .. }
            | BudgetError::TotalExceedsIncome { available, .. } => Some(*available),
            _ => None,
        }
    }

    /// Resolved monthly income to report alongside allocation failures.
    pub fn monthly_income(&self) -> Option<Decimal> {
        match self {
            BudgetError::NoIncomeSet => Some(Decimal::ZERO),
            BudgetError::LimitExceedsAvailable { monthly_income, .. }
            | BudgetError::TotalExceedsIncome { monthly_income, .. } => Some(*monthly_income),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BudgetError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_exceeds_message_uses_rupee_grouping() {
        let err = BudgetError::LimitExceedsAvailable {
            available: dec!(123456),
            monthly_income: dec!(200000),
        };
        assert_eq!(
            err.to_string(),
            "Budget limit exceeds available income. Maximum allowed: ₹1,23,456"
        );
        assert_eq!(err.available(), Some(dec!(123456)));
        assert_eq!(err.monthly_income(), Some(dec!(200000)));
    }

    #[test]
    fn test_no_income_reports_zero_guidance() {
        let err = BudgetError::NoIncomeSet;
        assert_eq!(err.available(), Some(Decimal::ZERO));
        assert_eq!(err.monthly_income(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_input_errors_carry_no_guidance() {
        assert_eq!(BudgetError::InvalidLimit.available(), None);
        assert_eq!(
            BudgetError::MissingField("userId".to_string()).monthly_income(),
            None
        );
        assert_eq!(
            BudgetError::InvalidCategoryLength { length: 1 }.to_string(),
            "Category must be between 2 and 50 characters (got 1)"
        );
    }
}
