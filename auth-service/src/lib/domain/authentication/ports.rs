use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Identity;
use crate::domain::user::models::User;
use crate::domain::user::models::UserCredentials;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRegistration;

/// Port for the authentication flows exposed to inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Returns
    /// Created user with its generated ID
    ///
    /// # Errors
    /// * `UserExists` - Username or email already registered
    /// * `Password` - Password could not be hashed
    async fn register(&self, registration: UserRegistration) -> Result<User, AuthError>;

    /// Verify credentials and issue a token pair.
    ///
    /// The refresh token is persisted before the pair is returned.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    async fn login(&self, credentials: UserCredentials) -> Result<auth::TokenPair, AuthError>;

    /// Exchange a refresh token for a new pair, consuming the old token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token unverifiable, unknown, expired, or owned by someone else
    async fn refresh_token(&self, refresh_token: &str) -> Result<auth::TokenPair, AuthError>;

    /// Revoke a single refresh token.
    ///
    /// # Errors
    /// * `NotFound` - Token is not outstanding
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Revoke every refresh token of a user. Always succeeds.
    async fn logout_all(&self, user_id: &UserId) -> Result<(), AuthError>;

    /// Resolve the caller behind an access token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token malformed, mis-signed or carrying a bad user ID
    /// * `ExpiredToken` - Token was valid but has expired
    async fn resolve_identity(&self, access_token: &str) -> Result<Identity, AuthError>;

    /// Load the profile of an authenticated user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_profile(&self, user_id: &UserId) -> Result<User, AuthError>;
}
