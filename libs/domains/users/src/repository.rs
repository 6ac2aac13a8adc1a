use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Lookups signal absence with `Ok(None)`, never with a sentinel value.
/// `update` and `delete` report a no-op as `Ok(false)` ("zero rows
/// affected"); business meaning is assigned by the service layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user; returns the freshly assigned positive id.
    /// Fails with `AlreadyExists` when the email is already taken.
    async fn add(&self, user: User) -> UserResult<i32>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All stored users; order is unspecified
    async fn get_all(&self) -> UserResult<Vec<User>>;

    /// Overwrite name/last_name of the record with the user's email
    async fn update(&self, user: User) -> UserResult<bool>;

    /// Remove the record with the given id
    async fn delete(&self, id: i32) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// The store is a single email-keyed map behind a process-wide read/write
/// lock; ids come from an atomic counter and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: User) -> UserResult<i32> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut user = user;
        user.id = id;

        tracing::info!(user_id = id, email = %user.email, "created user");
        users.insert(user.email.clone(), user);

        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        // Snapshot copy under the read lock; concurrent writers wait.
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.email) {
            Some(existing) => {
                existing.name = user.name;
                existing.last_name = user.last_name;
                tracing::info!(user_id = existing.id, "updated user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut users = self.users.write().await;

        let email = users
            .values()
            .find(|u| u.id == id)
            .map(|u| u.email.clone());

        match email {
            Some(email) => {
                users.remove(&email);
                tracing::info!(user_id = id, "deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
