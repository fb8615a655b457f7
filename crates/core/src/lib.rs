//! Budgetwise Core - Domain entities, services, and traits.
//!
//! This crate contains the budget allocation and spend attribution rules.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod budgets;
pub mod constants;
pub mod errors;
pub mod income;
pub mod spending;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
