use crate::errors::Result;

use super::transactions_model::{Transaction, TransactionFilter};

/// Read access to the external transaction store.
///
/// This engine never writes transactions.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Returns the user's transactions matching `filter`.
    ///
    /// Date bounds are inclusive. Ordering of the result is unspecified.
    fn get_transactions(&self, user_id: &str, filter: &TransactionFilter)
        -> Result<Vec<Transaction>>;
}
