use crate::errors::Result;

use super::users_model::User;

/// Read access to the external user store.
pub trait UserRepositoryTrait: Send + Sync {
    /// Looks up a user by id. Returns `Ok(None)` when no such user exists.
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}
