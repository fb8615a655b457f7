//! Transactions module - read-only view of the transaction store.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{Transaction, TransactionFilter, TransactionType};
pub use transactions_traits::TransactionRepositoryTrait;
