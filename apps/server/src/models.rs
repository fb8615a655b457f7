use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use budgetwise_core::budgets::{self as core_budgets, BudgetInput};
use budgetwise_core::spending as core_spending;
use budgetwise_core::utils::to_iso_string;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit: Decimal,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<core_budgets::Budget> for Budget {
    fn from(b: core_budgets::Budget) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            category: b.category,
            limit: b.limit,
            created_at: b.created_at.as_ref().map(to_iso_string),
            updated_at: b.updated_at.as_ref().map(to_iso_string),
        }
    }
}

/// Body of `POST /budgets/add` and `POST /budgets/validate`.
///
/// `limit` may be sent as a JSON number or as a numeric string.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub user_id: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub limit: Option<Value>,
}

impl From<BudgetRequest> for BudgetInput {
    fn from(req: BudgetRequest) -> Self {
        let limit = match req.limit {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            // Numbers render as their literal; anything else fails limit parsing
            Some(other) => Some(other.to_string()),
        };
        BudgetInput {
            user_id: req.user_id,
            category: req.category,
            limit,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBudgetByCategoryRequest {
    pub user_id: Option<String>,
    pub category: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSaved {
    pub message: String,
    pub budget: Budget,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AllocationCheck {
    pub monthly_income: Decimal,
    pub other_total: Decimal,
    pub available: Decimal,
}

impl From<core_budgets::AllocationCheck> for AllocationCheck {
    fn from(c: core_budgets::AllocationCheck) -> Self {
        Self {
            monthly_income: c.monthly_income,
            other_total: c.other_total,
            available: c.available,
        }
    }
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    /// First day of the window (inclusive). Defaults to the first of the current month.
    pub start_date: Option<NaiveDate>,
    /// Last day of the window (inclusive). Defaults to the end of the current month.
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
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

impl From<core_spending::TransactionProgress> for TransactionProgress {
    fn from(t: core_spending::TransactionProgress) -> Self {
        Self {
            transaction_id: t.transaction_id,
            category: t.category,
            amount: t.amount,
            date: t.date,
            cumulative_amount: t.cumulative_amount,
            budget_limit: t.budget_limit,
            percent_used: t.percent_used,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub category: String,
    pub spent: Decimal,
    pub budget_limit: Option<Decimal>,
    pub percent_used: Option<Decimal>,
}

impl From<core_spending::CategoryProgress> for CategoryProgress {
    fn from(c: core_spending::CategoryProgress) -> Self {
        Self {
            category: c.category,
            spent: c.spent,
            budget_limit: c.budget_limit,
            percent_used: c.percent_used,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub transactions: Vec<TransactionProgress>,
    pub categories: Vec<CategoryProgress>,
}

impl From<core_spending::BudgetProgress> for BudgetProgress {
    fn from(p: core_spending::BudgetProgress) -> Self {
        Self {
            user_id: p.user_id,
            start_date: p.window.start_date,
            end_date: p.window.end_date,
            transactions: p.transactions.into_iter().map(Into::into).collect(),
            categories: p.categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(limit: Value) -> BudgetInput {
        serde_json::from_value::<BudgetRequest>(json!({
            "userId": "u1",
            "category": "Food",
            "limit": limit,
        }))
        .unwrap()
        .into()
    }

    #[test]
    fn limit_accepts_numbers_and_strings() {
        assert_eq!(request(json!(2000)).limit.as_deref(), Some("2000"));
        assert_eq!(request(json!(12.5)).limit.as_deref(), Some("12.5"));
        assert_eq!(request(json!("4000")).limit.as_deref(), Some("4000"));
        assert_eq!(request(Value::Null).limit, None);
    }

    #[test]
    fn non_numeric_limit_fails_validation() {
        assert!(request(json!(true)).validate().is_err());
        assert!(request(json!({"amount": 5})).validate().is_err());
    }
}
