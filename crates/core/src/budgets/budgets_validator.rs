//! Budget allocation rules.
//!
//! Every budget write must keep the sum of a user's limits within their
//! resolved monthly income. The checks here are pure functions over
//! snapshots so they can run both ahead of a write and again inside the
//! storage transaction that performs it.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::budgets_errors::BudgetError;
use super::budgets_model::{AllocationCheck, Budget};
use crate::constants::{MAX_CATEGORY_LENGTH, MIN_CATEGORY_LENGTH};

/// Trims a category and checks its length in characters.
pub fn normalize_category(raw: &str) -> Result<String, BudgetError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if !(MIN_CATEGORY_LENGTH..=MAX_CATEGORY_LENGTH).contains(&length) {
        return Err(BudgetError::InvalidCategoryLength { length });
    }
    Ok(trimmed.to_string())
}

/// Parses a limit given as text. Accepts plain and scientific notation.
pub fn parse_limit(raw: &str) -> Result<Decimal, BudgetError> {
    let trimmed = raw.trim();
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| BudgetError::InvalidLimit)?;
    validate_limit(parsed)
}

pub fn validate_limit(limit: Decimal) -> Result<Decimal, BudgetError> {
    if limit <= Decimal::ZERO {
        return Err(BudgetError::InvalidLimit);
    }
    Ok(limit)
}

/// Sum of limits over `budgets`, skipping the one with id `editing_id`.
///
/// Saturates at `Decimal::MAX`.
pub fn other_budgets_total(budgets: &[Budget], editing_id: Option<&str>) -> Decimal {
    budgets
        .iter()
        .filter(|b| editing_id != Some(b.id.as_str()))
        .fold(Decimal::ZERO, |total, b| total.saturating_add(b.limit))
}

/// Checks that `proposed_limit` fits in the user's income next to their other budgets.
///
/// `budgets` is the user's full budget set; `editing_id` names the budget
/// being replaced, if any, so its current limit is not counted twice.
pub fn check_allocation(
    monthly_income: Decimal,
    budgets: &[Budget],
    editing_id: Option<&str>,
    proposed_limit: Decimal,
) -> Result<AllocationCheck, BudgetError> {
    if monthly_income <= Decimal::ZERO {
        return Err(BudgetError::NoIncomeSet);
    }

    let other_total = other_budgets_total(budgets, editing_id);
    let available = monthly_income.saturating_sub(other_total);

    if proposed_limit > available {
        return Err(BudgetError::LimitExceedsAvailable {
            available,
            monthly_income,
        });
    }

    // Same condition as above for non-negative totals. Kept as a separate
    // guard with its own error so clients matching on it keep working.
    if other_total.saturating_add(proposed_limit) > monthly_income {
        return Err(BudgetError::TotalExceedsIncome {
            available,
            monthly_income,
        });
    }

    Ok(AllocationCheck {
        monthly_income,
        other_total,
        available,
    })
}
