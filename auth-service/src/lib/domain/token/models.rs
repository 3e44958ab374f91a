use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Server-side record of one outstanding refresh token.
///
/// Keyed by the token string in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredToken {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            expires_at,
        }
    }

    /// A record is expired strictly after its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
