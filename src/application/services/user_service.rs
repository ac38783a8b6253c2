//! User management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Service for creating, reading, updating and deleting users.
///
/// Passwords are digested with a per-user salt before they reach the
/// repository.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    pub async fn get_user(&self, id: u64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<User, AppError> {
        let user = self
            .repository
            .create(NewUser {
                name,
                email,
                password_hash: hash_password(password)?,
            })
            .await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Applies the given changes. Absent fields are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    pub async fn update_user(
        &self,
        id: u64,
        name: Option<String>,
        email: Option<String>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let patch = UserPatch {
            name,
            email,
            password_hash: password.map(hash_password).transpose()?,
        };

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    pub async fn delete_user(&self, id: u64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(user_not_found(id));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

fn user_not_found(id: u64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::utils::password::verify_password;
    use chrono::Utc;

    fn create_test_user(id: u64) -> User {
        User {
            id,
            name: "John".to_string(),
            email: "john.doe@example.com".to_string(),
            password_hash: hash_password("password").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|new_user| {
                verify_password("password", &new_user.password_hash) && new_user.name == "John"
            })
            .times(1)
            .returning(|_| Ok(create_test_user(1)));

        let service = UserService::new(Arc::new(mock_repo));

        let user = service
            .create_user(
                "John".to_string(),
                "john.doe@example.com".to_string(),
                "password",
            )
            .await
            .unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service.get_user(42).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_user_builds_patch() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, patch| {
                *id == 1
                    && patch.name.is_none()
                    && patch.email.as_deref() == Some("new@example.com")
                    && patch
                        .password_hash
                        .as_deref()
                        .is_some_and(|hash| verify_password("secret", hash))
            })
            .times(1)
            .returning(|id, _| Ok(Some(create_test_user(id))));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .update_user(1, None, Some("new@example.com".to_string()), Some("secret"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service.update_user(7, None, None, None).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo));

        assert!(service.delete_user(3).await.is_err());
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Ok(vec![create_test_user(1), create_test_user(2)]));

        let service = UserService::new(Arc::new(mock_repo));

        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }
}
