use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Storage for user records.
///
/// Username and email are each unique across stored users. Implementations
/// must make every operation linearizable: the uniqueness check in `create`
/// and the insert it guards cannot interleave with another writer.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `AlreadyExists` - Another user has the same username or email
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - No user with this ID
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - No user with this username
    async fn find_by_username(&self, username: &str) -> Result<User, UserError>;

    /// # Errors
    /// * `NotFound` - No user with this email
    async fn find_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Replace an existing user record wholesale.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `AlreadyExists` - Another user already holds the new username or email
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
