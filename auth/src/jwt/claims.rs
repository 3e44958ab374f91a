use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// What a token may be presented for.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    #[default]
    Access,
    Refresh,
}

/// Identity claims carried by every access and refresh token.
///
/// `user_id` and `username` are mandatory strings; a token whose payload
/// lacks either (or carries another JSON type) fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: String,
    pub username: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier, keeps tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,

    /// Tokens without it are treated as access tokens
    #[serde(default)]
    pub token_use: TokenUse,
}

impl TokenClaims {
    /// Build claims for a user, valid from `issued_at` until `expires_at`.
    pub fn new(
        user_id: impl ToString,
        username: impl ToString,
        token_use: TokenUse,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_use,
        }
    }
}

/// Access/refresh token pair handed to a client after login or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the access token only
    pub expires_at: DateTime<Utc>,
}
