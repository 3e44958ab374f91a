use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// A single lock covers the whole map, so the uniqueness scan and the insert
/// in `create`/`update` are one critical section.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Find a user other than `except` holding the username or email of `user`.
    fn conflicting<'a>(
        users: &'a HashMap<UserId, User>,
        user: &User,
        except: Option<&UserId>,
    ) -> Option<&'a User> {
        users.values().find(|existing| {
            Some(&existing.id) != except
                && (existing.username == user.username || existing.email == user.email)
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(UserError::AlreadyExists(user.id.to_string()));
        }
        if let Some(existing) = Self::conflicting(&users, &user, None) {
            return Err(UserError::AlreadyExists(existing.username.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.username.as_str() == username)
            .cloned()
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if let Some(existing) = Self::conflicting(&users, &user, Some(&user.id)) {
            return Err(UserError::AlreadyExists(existing.username.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}
