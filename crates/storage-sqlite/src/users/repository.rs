use std::sync::Arc;

use diesel::prelude::*;

use budgetwise_core::users::{User, UserRepositoryTrait};
use budgetwise_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::users;

/// Read-only access to the user store.
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }
}
