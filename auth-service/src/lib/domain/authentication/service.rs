use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::TokenUse;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::TokenSettings;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::token::errors::TokenError;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserCredentials;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRegistration;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Digest checked against when a login names an unknown user, so that path
/// pays for a full Argon2 verification like a wrong password does.
static DUMMY_DIGEST: OnceLock<String> = OnceLock::new();

/// Domain service implementing the authentication flows.
///
/// Owns every invariant that spans users and refresh tokens. The stores are
/// independent: no method holds one store's lock while calling the other.
pub struct AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    user_repository: Arc<UR>,
    token_repository: Arc<TR>,
    password_hasher: auth::PasswordHasher,
    jwt_handler: auth::JwtHandler,
    settings: TokenSettings,
}

impl<UR, TR> AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User store
    /// * `token_repository` - Refresh-token store
    /// * `jwt_secret` - Shared secret for signing and verifying tokens
    /// * `settings` - Access and refresh token lifetimes
    pub fn new(
        user_repository: Arc<UR>,
        token_repository: Arc<TR>,
        jwt_secret: &[u8],
        settings: TokenSettings,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            password_hasher: auth::PasswordHasher::new(),
            jwt_handler: auth::JwtHandler::new(jwt_secret),
            settings,
        }
    }

    // Argon2 is CPU-bound; keep it off the async worker threads.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }

    async fn verify_against_dummy(&self, password: String) -> Result<(), AuthError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || {
            let digest = DUMMY_DIGEST
                .get_or_init(|| hasher.hash("dummy-password").unwrap_or_default());
            hasher.verify(&password, digest)
        })
        .await
        .map(|_| ())
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }

    /// Fail with `UserExists` if a lookup found a user.
    fn ensure_absent(lookup: Result<User, UserError>) -> Result<(), AuthError> {
        match lookup {
            Ok(_) => Err(AuthError::UserExists),
            Err(UserError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Mint a pair for `user` and record its refresh token.
    ///
    /// Nothing is returned unless the refresh token is in the store.
    async fn issue_tokens(&self, user: &User) -> Result<auth::TokenPair, AuthError> {
        let pair = self.jwt_handler.issue_pair(
            &user.id.to_string(),
            user.username.as_str(),
            self.settings.access_ttl,
            self.settings.refresh_ttl,
        )?;

        let expires_at = Utc::now() + self.settings.refresh_ttl;
        self.token_repository
            .store(&user.id, &pair.refresh_token, expires_at)
            .await?;

        Ok(pair)
    }
}

#[async_trait]
impl<UR, TR> AuthServicePort for AuthService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn register(&self, registration: UserRegistration) -> Result<User, AuthError> {
        Self::ensure_absent(
            self.user_repository
                .find_by_username(registration.username.as_str())
                .await,
        )?;
        Self::ensure_absent(
            self.user_repository
                .find_by_email(registration.email.as_str())
                .await,
        )?;

        let password_hash = self.hash_password(registration.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: registration.username,
            email: registration.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // A concurrent registration may have claimed the name since the lookups.
        let created_user = self.user_repository.create(user).await.map_err(|e| match e {
            UserError::AlreadyExists(_) => AuthError::UserExists,
            other => other.into(),
        })?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, credentials: UserCredentials) -> Result<auth::TokenPair, AuthError> {
        let user = match self
            .user_repository
            .find_by_username(&credentials.username)
            .await
        {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => {
                self.verify_against_dummy(credentials.password).await?;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self
            .verify_password(credentials.password, user.password_hash.clone())
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.issue_tokens(&user).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<auth::TokenPair, AuthError> {
        let claims = self
            .jwt_handler
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidToken)?;
        if claims.token_use != TokenUse::Refresh {
            return Err(AuthError::InvalidToken);
        }

        // Expired records count as absent
        let owner = self
            .token_repository
            .get_owner(refresh_token)
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        if claims.user_id != owner.to_string() {
            tracing::warn!(
                stored_owner = %owner,
                claimed_owner = %claims.user_id,
                "Refresh token owner does not match its claims"
            );
            return Err(AuthError::InvalidToken);
        }

        let user = match self.user_repository.find_by_id(&owner).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => return Err(AuthError::InvalidToken),
            Err(e) => return Err(e.into()),
        };

        // Consume before minting. Losing a race here means another request
        // already rotated this token.
        self.token_repository
            .delete_by_token(refresh_token)
            .await
            .map_err(|e| match e {
                TokenError::NotFound => AuthError::InvalidToken,
                other => other.into(),
            })?;

        let pair = self.issue_tokens(&user).await?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");

        Ok(pair)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let expired = match self.token_repository.get_owner(refresh_token).await {
            Ok(_) => false,
            Err(TokenError::Expired) => true,
            Err(TokenError::NotFound) => return Err(AuthError::NotFound),
            Err(e) => return Err(e.into()),
        };

        // Stale records are removed too, but the caller still sees NotFound.
        match self.token_repository.delete_by_token(refresh_token).await {
            Ok(()) if expired => Err(AuthError::NotFound),
            Ok(()) => {
                tracing::debug!("Refresh token revoked");
                Ok(())
            }
            Err(TokenError::NotFound) => Err(AuthError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn logout_all(&self, user_id: &UserId) -> Result<(), AuthError> {
        let revoked = self.token_repository.delete_all_for_user(user_id).await;

        tracing::info!(user_id = %user_id, revoked, "Revoked all refresh tokens");

        Ok(())
    }

    async fn resolve_identity(&self, access_token: &str) -> Result<Identity, AuthError> {
        let claims = self.jwt_handler.verify(access_token)?;
        if claims.token_use != TokenUse::Access {
            return Err(AuthError::InvalidToken);
        }
        let user_id = UserId::from_string(&claims.user_id).map_err(|_| AuthError::InvalidToken)?;

        Ok(Identity {
            user_id,
            username: claims.username,
        })
    }

    async fn get_profile(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.user_repository
            .find_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserError::NotFound(_) => AuthError::NotFound,
                other => other.into(),
            })
    }
}
