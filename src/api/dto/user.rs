//! DTOs for the users resource.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::User;

/// User as returned to clients; never includes the password digest.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response body for `DELETE /v1/users/{id}`.
#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub deleted: u64,
}
