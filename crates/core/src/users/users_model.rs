//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a user record owned by the user store.
///
/// `salary` is kept verbatim as entered; it may carry locale grouping
/// separators (`"9,99,005"`) and is parsed by the income resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub salary: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
