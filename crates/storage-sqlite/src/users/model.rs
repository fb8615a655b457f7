//! Database models for users.

use diesel::prelude::*;

use budgetwise_core::users::User;
use budgetwise_core::utils::parse_timestamp;

/// Database model for users. Only the columns the engine reads are mapped.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub salary: Option<String>,
    pub created_at: Option<String>,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            salary: db.salary,
            created_at: db.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}
