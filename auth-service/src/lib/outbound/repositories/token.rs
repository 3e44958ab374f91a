use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::StoredToken;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::UserId;

/// Process-local refresh-token store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenRepository {
    /// Map of refresh token -> owner and expiry
    tokens: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn store(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenError> {
        match self.tokens.write().await.entry(token.to_string()) {
            Entry::Occupied(_) => Err(TokenError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(StoredToken::new(*user_id, expires_at));
                Ok(())
            }
        }
    }

    async fn get_owner(&self, token: &str) -> Result<UserId, TokenError> {
        let tokens = self.tokens.read().await;
        let stored = tokens.get(token).ok_or(TokenError::NotFound)?;

        if stored.is_expired_at(Utc::now()) {
            return Err(TokenError::Expired);
        }

        Ok(stored.user_id)
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), TokenError> {
        self.tokens
            .write()
            .await
            .remove(token)
            .map(|_| ())
            .ok_or(TokenError::NotFound)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, stored| stored.user_id != *user_id);
        before - tokens.len()
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, stored| !stored.is_expired_at(now));
        before - tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use futures::future::join_all;

    use super::*;

    fn in_one_hour() -> DateTime<Utc> {
        Utc::now() + Duration::hours(1)
    }

    #[tokio::test]
    async fn test_store_and_get_owner() {
        let repository = InMemoryTokenRepository::new();
        let user_id = UserId::new();

        repository.store(&user_id, "token-a", in_one_hour()).await.unwrap();

        assert_eq!(repository.get_owner("token-a").await, Ok(user_id));
    }

    #[tokio::test]
    async fn test_store_rejects_duplicate_token() {
        let repository = InMemoryTokenRepository::new();
        let first = UserId::new();

        repository.store(&first, "token-a", in_one_hour()).await.unwrap();
        let result = repository.store(&UserId::new(), "token-a", in_one_hour()).await;

        assert_eq!(result, Err(TokenError::AlreadyExists));
        assert_eq!(repository.get_owner("token-a").await, Ok(first));
    }

    #[tokio::test]
    async fn test_get_owner_missing_token() {
        let repository = InMemoryTokenRepository::new();

        assert_eq!(
            repository.get_owner("missing").await,
            Err(TokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_reported_not_dropped() {
        let repository = InMemoryTokenRepository::new();
        let past = Utc::now() - Duration::seconds(1);

        repository.store(&UserId::new(), "stale", past).await.unwrap();

        assert_eq!(repository.get_owner("stale").await, Err(TokenError::Expired));
        assert_eq!(repository.get_owner("stale").await, Err(TokenError::Expired));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_by_token() {
        let repository = InMemoryTokenRepository::new();
        repository
            .store(&UserId::new(), "token-a", in_one_hour())
            .await
            .unwrap();

        assert_eq!(repository.delete_by_token("token-a").await, Ok(()));
        assert_eq!(
            repository.get_owner("token-a").await,
            Err(TokenError::NotFound)
        );
        assert_eq!(
            repository.delete_by_token("token-a").await,
            Err(TokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_all_for_user() {
        let repository = InMemoryTokenRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        repository.store(&alice, "alice-1", in_one_hour()).await.unwrap();
        repository.store(&alice, "alice-2", in_one_hour()).await.unwrap();
        repository.store(&bob, "bob-1", in_one_hour()).await.unwrap();

        assert_eq!(repository.delete_all_for_user(&alice).await, 2);
        assert_eq!(
            repository.get_owner("alice-1").await,
            Err(TokenError::NotFound)
        );
        assert_eq!(
            repository.get_owner("alice-2").await,
            Err(TokenError::NotFound)
        );
        assert_eq!(repository.get_owner("bob-1").await, Ok(bob));

        // Idempotent
        assert_eq!(repository.delete_all_for_user(&alice).await, 0);
        assert_eq!(repository.delete_all_for_user(&UserId::new()).await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let repository = InMemoryTokenRepository::new();
        let user_id = UserId::new();
        let now = Utc::now();

        repository
            .store(&user_id, "stale", now - Duration::minutes(1))
            .await
            .unwrap();
        repository.store(&user_id, "fresh", in_one_hour()).await.unwrap();

        assert_eq!(repository.purge_expired(now).await, 1);
        assert_eq!(repository.len().await, 1);
        assert_eq!(repository.get_owner("fresh").await, Ok(user_id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_succeed_once() {
        let repository = InMemoryTokenRepository::new();
        repository
            .store(&UserId::new(), "token-a", in_one_hour())
            .await
            .unwrap();

        let handles = (0..16).map(|_| {
            let repository = repository.clone();
            tokio::spawn(async move { repository.delete_by_token("token-a").await })
        });

        let deleted = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.expect("task panicked"))
            .filter(Result::is_ok)
            .count();

        assert_eq!(deleted, 1);
        assert!(repository.is_empty().await);
    }
}
