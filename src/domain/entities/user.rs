//! User entity and its creation/update inputs.

use chrono::{DateTime, Utc};

/// A stored user.
///
/// Holds only the password digest; the plain password never leaves the
/// service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }

    /// Applies the patch to `user`, bumping `updated_at` when anything changed.
    pub fn apply(self, user: &mut User, now: DateTime<Utc>) {
        if self.is_empty() {
            return;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        let created = Utc::now() - Duration::hours(1);
        User {
            id: 1,
            name: "John".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_patch_updates_only_given_fields() {
        let mut user = user();
        let now = Utc::now();

        UserPatch {
            name: Some("Jane".to_string()),
            ..UserPatch::default()
        }
        .apply(&mut user, now);

        assert_eq!(user.name, "Jane");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.updated_at, now);
    }

    #[test]
    fn test_empty_patch_keeps_timestamp() {
        let mut user = user();
        let before = user.updated_at;

        UserPatch::default().apply(&mut user, Utc::now());

        assert_eq!(user.updated_at, before);
        assert!(UserPatch::default().is_empty());
    }
}
