//! Database models for budgets.

use std::convert::TryFrom;

use diesel::prelude::*;

use budgetwise_core::budgets::Budget;
use budgetwise_core::utils::parse_timestamp;

use crate::errors::StorageError;
use crate::utils::parse_stored_decimal;

/// Database model for budgets
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit_amount: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for inserting a budget
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit_amount: String,
    pub created_at: String,
    pub updated_at: String,
}

// A limit that cannot be read back would silently weaken the income
// ceiling, so it is an error rather than a default.
impl TryFrom<BudgetDB> for Budget {
    type Error = StorageError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            limit: parse_stored_decimal(&db.limit_amount, "budgets.limit_amount")?,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
            id: db.id,
            user_id: db.user_id,
            category: db.category,
        })
    }
}

pub(crate) fn into_budgets(rows: Vec<BudgetDB>) -> Result<Vec<Budget>, StorageError> {
    rows.into_iter().map(Budget::try_from).collect()
}
