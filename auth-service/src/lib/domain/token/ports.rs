use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::token::errors::TokenError;
use crate::domain::user::models::UserId;

/// Storage for outstanding refresh tokens, keyed by the token string.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Record a refresh token for a user.
    ///
    /// # Errors
    /// * `AlreadyExists` - The token string is already stored
    async fn store(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenError>;

    /// Resolve the user owning a refresh token.
    ///
    /// Expired records are reported, not dropped.
    ///
    /// # Errors
    /// * `NotFound` - Token is not stored
    /// * `Expired` - Token is stored but past its expiry
    async fn get_owner(&self, token: &str) -> Result<UserId, TokenError>;

    /// # Errors
    /// * `NotFound` - Token is not stored
    async fn delete_by_token(&self, token: &str) -> Result<(), TokenError>;

    /// Remove every token owned by a user. Never fails.
    ///
    /// # Returns
    /// Number of tokens removed
    async fn delete_all_for_user(&self, user_id: &UserId) -> usize;

    /// Drop records whose expiry is before `now`.
    ///
    /// # Returns
    /// Number of tokens removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}
