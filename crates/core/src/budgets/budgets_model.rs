//! Budget domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::budgets_errors::BudgetError;
use super::budgets_validator::{normalize_category, parse_limit};

/// Domain model representing a per-user, per-category monthly spending limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated input for creating or updating a budget.
///
/// `category` is already trimmed and `limit` is positive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub user_id: String,
    pub category: String,
    pub limit: Decimal,
}

/// Raw, unvalidated budget fields as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub user_id: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
}

impl BudgetInput {
    /// Checks presence of every field, then the limit, then the category.
    pub fn validate(self) -> Result<NewBudget, BudgetError> {
        let user_id = required(self.user_id, "userId")?;
        let category = required(self.category, "category")?;
        let limit = required(self.limit, "limit")?;

        let limit = parse_limit(&limit)?;
        let category = normalize_category(&category)?;

        Ok(NewBudget {
            user_id: user_id.trim().to_string(),
            category,
            limit,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, BudgetError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BudgetError::MissingField(field.to_string()))
}

/// Result of a budget upsert: the persisted record and whether it was newly created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpsertResult {
    pub budget: Budget,
    pub created: bool,
}

/// Snapshot of a user's allocation headroom at validation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationCheck {
    pub monthly_income: Decimal,
    pub other_total: Decimal,
    pub available: Decimal,
}
