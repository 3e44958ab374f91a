use chrono::Duration;

use crate::domain::user::models::UserId;

/// Lifetimes applied to newly minted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenSettings {
    pub fn new(access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            access_ttl,
            refresh_ttl,
        }
    }
}

impl Default for TokenSettings {
    /// 15 minute access tokens, 7 day refresh tokens.
    fn default() -> Self {
        Self::new(Duration::minutes(15), Duration::days(7))
    }
}

/// Identity extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}
