use std::convert::TryFrom;
use std::sync::Arc;

use diesel::prelude::*;
use diesel::sql_types::Text;
use log::warn;

use budgetwise_core::transactions::{Transaction, TransactionFilter, TransactionRepositoryTrait};
use budgetwise_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::transactions;
use crate::utils::STORED_DATE_FORMAT;

diesel::define_sql_function! {
    fn lower(x: Text) -> Text;
}

diesel::define_sql_function! {
    fn trim(x: Text) -> Text;
}

/// Read-only access to the transaction store.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TransactionRepository { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some(transaction_type) = filter.transaction_type {
            // Stored types are parsed case-insensitively, so compare the same way
            query = query.filter(
                lower(trim(transactions::transaction_type)).eq(transaction_type.as_str()),
            );
        }
        // ISO dates compare correctly as text
        if let Some(start_date) = filter.start_date {
            query = query.filter(
                transactions::transaction_date.ge(start_date.format(STORED_DATE_FORMAT).to_string()),
            );
        }
        if let Some(end_date) = filter.end_date {
            // Upper bound by the following day so stored timestamps on end_date still match
            let bound = end_date
                .succ_opt()
                .unwrap_or(end_date)
                .format(STORED_DATE_FORMAT)
                .to_string();
            query = query.filter(transactions::transaction_date.lt(bound));
        }

        let rows = query
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match Transaction::try_from(row) {
                // Re-check in memory: the text comparison above is only a prefilter
                Ok(transaction) if filter.matches(&transaction) => result.push(transaction),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable transaction {}: {}", id, e),
            }
        }
        Ok(result)
    }
}
