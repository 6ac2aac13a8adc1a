//! Sharded in-memory repository with a fan-out `get_all`.
//!
//! Same contract as [`InMemoryUserRepository`](crate::InMemoryUserRepository),
//! but the store is split over N independently locked shards keyed by an
//! email hash. `get_all` copies each shard concurrently, one task per shard,
//! and fans the snapshots back in through a channel.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::{RwLock, mpsc};

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

const DEFAULT_SHARD_COUNT: usize = 8;

type Shard = RwLock<HashMap<String, User>>;

#[derive(Debug, Clone)]
pub struct ShardedInMemoryRepository {
    shards: Arc<Vec<Shard>>,
    next_id: Arc<AtomicI32>,
}

impl Default for ShardedInMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardedInMemoryRepository {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    pub fn with_shards(count: usize) -> Self {
        let count = count.max(1);
        let shards = (0..count).map(|_| RwLock::new(HashMap::new())).collect();

        Self {
            shards: Arc::new(shards),
            next_id: Arc::new(AtomicI32::new(0)),
        }
    }

    fn shard_for(&self, email: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        email.hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.shards.len();
        &self.shards[index]
    }
}

#[async_trait]
impl UserRepository for ShardedInMemoryRepository {
    async fn add(&self, user: User) -> UserResult<i32> {
        // Same email always hashes to the same shard, so the duplicate
        // check only needs this shard's lock.
        let mut shard = self.shard_for(&user.email).write().await;

        if shard.contains_key(&user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut user = user;
        user.id = id;

        tracing::info!(user_id = id, email = %user.email, "created user");
        shard.insert(user.email.clone(), user);

        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        for shard in self.shards.iter() {
            let shard = shard.read().await;
            if let Some(user) = shard.values().find(|u| u.id == id) {
                return Ok(Some(user.clone()));
            }
        }

        Ok(None)
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let shard = self.shard_for(email).read().await;
        Ok(shard.get(email).cloned())
    }

    /// Fan-out/fan-in: one task per shard copies its records into the
    /// channel; the collector drains until every sender has closed.
    /// Each shard's copy is atomic under its read lock, so the result is
    /// a consistent per-shard snapshot even under concurrent writers.
    async fn get_all(&self) -> UserResult<Vec<User>> {
        let (tx, mut rx) = mpsc::channel::<Vec<User>>(self.shards.len());

        let mut tasks = Vec::with_capacity(self.shards.len());
        for index in 0..self.shards.len() {
            let shards = Arc::clone(&self.shards);
            let tx = tx.clone();

            tasks.push(tokio::spawn(async move {
                let shard = shards[index].read().await;
                let snapshot: Vec<User> = shard.values().cloned().collect();
                drop(shard);

                let _ = tx.send(snapshot).await;
            }));
        }
        drop(tx);

        let mut users = Vec::new();
        while let Some(batch) = rx.recv().await {
            users.extend(batch);
        }

        for result in join_all(tasks).await {
            result.map_err(|e| UserError::Unknown(e.to_string()))?;
        }

        Ok(users)
    }

    async fn update(&self, user: User) -> UserResult<bool> {
        let mut shard = self.shard_for(&user.email).write().await;

        match shard.get_mut(&user.email) {
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
        for shard in self.shards.iter() {
            let mut shard = shard.write().await;

            let email = shard
                .values()
                .find(|u| u.id == id)
                .map(|u| u.email.clone());

            if let Some(email) = email {
                shard.remove(&email);
                tracing::info!(user_id = id, "deleted user");
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_user(email: &str) -> User {
        User::new(email.to_string(), "John".to_string(), "Connor".to_string())
    }

    #[tokio::test]
    async fn test_round_trip_across_shards() {
        let repo = ShardedInMemoryRepository::with_shards(4);

        let id = repo.add(sample_user("test@example.com")).await.unwrap();

        assert_eq!(
            repo.get_by_email("test@example.com").await.unwrap().unwrap().id,
            id
        );
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap().name, "John");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let repo = ShardedInMemoryRepository::new();

        repo.add(sample_user("test@example.com")).await.unwrap();
        let result = repo.add(sample_user("test@example.com")).await;

        assert!(matches!(result, Err(UserError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_all_collects_every_shard() {
        let repo = ShardedInMemoryRepository::with_shards(4);

        repo.add(sample_user("a@example.com")).await.unwrap();
        repo.add(sample_user("b@example.com")).await.unwrap();
        repo.add(sample_user("c@example.com")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 3);

        let emails: HashSet<String> = all.into_iter().map(|u| u.email).collect();
        assert!(emails.contains("a@example.com"));
        assert!(emails.contains("b@example.com"));
        assert!(emails.contains("c@example.com"));
    }

    #[tokio::test]
    async fn test_get_all_under_concurrent_adds() {
        let repo = ShardedInMemoryRepository::new();

        for i in 0..10 {
            repo.add(sample_user(&format!("seed{i}@example.com")))
                .await
                .unwrap();
        }

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..50 {
                    repo.add(sample_user(&format!("extra{i}@example.com")))
                        .await
                        .unwrap();
                }
            })
        };

        // Every snapshot observes at least the seeds and never a torn record.
        for _ in 0..20 {
            let all = repo.get_all().await.unwrap();
            assert!(all.len() >= 10);
            assert!(all.iter().all(|u| u.id > 0 && !u.email.is_empty()));
        }

        writer.await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 60);
    }

    #[tokio::test]
    async fn test_delete_scans_all_shards() {
        let repo = ShardedInMemoryRepository::with_shards(4);

        let id = repo.add(sample_user("test@example.com")).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
