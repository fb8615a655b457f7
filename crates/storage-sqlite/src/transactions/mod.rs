//! SQLite storage implementation for the transaction store (read-only).

mod model;
mod repository;

pub use model::TransactionDB;
pub use repository::TransactionRepository;
