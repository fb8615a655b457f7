//! Database models for transactions.

use std::convert::TryFrom;

use diesel::prelude::*;

use budgetwise_core::transactions::{Transaction, TransactionType};

use crate::errors::StorageError;
use crate::utils::{parse_stored_date, parse_stored_decimal};

/// Database model for transactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub transaction_type: String,
    pub category: Option<String>,
    pub transaction_date: String,
    pub created_at: String,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let transaction_type = db
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| StorageError::InvalidStoredValue(e.to_string()))?;
        Ok(Self {
            amount: parse_stored_decimal(&db.amount, "transactions.amount")?,
            date: parse_stored_date(&db.transaction_date, "transactions.transaction_date")?,
            id: db.id,
            user_id: db.user_id,
            transaction_type,
            category: db.category,
        })
    }
}
