//! In-memory implementation of the user repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Process-local user store.
///
/// Data lives for the process lifetime only. Ids start at 1 and are never
/// reused, even after deletion.
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<u64, User>>,
    next_id: AtomicU64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update(&self, id: u64, patch: UserPatch) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).map(|user| {
            patch.apply(user, Utc::now());
            user.clone()
        }))
    }

    async fn delete(&self, id: u64) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("John")).await.unwrap();
        let second = repo.create(new_user("Jane")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_update_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("John")).await.unwrap();

        let found = repo.find_by_id(user.id).await.unwrap();
        assert_eq!(found, Some(user.clone()));

        let updated = repo
            .update(
                user.id,
                UserPatch {
                    name: Some("Johnny".to_string()),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Johnny");
        assert_eq!(updated.email, user.email);

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo.update(99, UserPatch::default()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("John")).await.unwrap();
        repo.delete(user.id).await.unwrap();

        let next = repo.create(new_user("Jane")).await.unwrap();

        assert_eq!(next.id, 2);
    }
}
