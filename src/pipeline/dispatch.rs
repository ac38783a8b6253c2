//! Handler identifiers and the dispatch seam to business logic.

use async_trait::async_trait;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::AppError;
use crate::pipeline::validation::ValidatedRequest;

/// Business-logic entry point a route ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandlerId {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl HandlerId {
    pub fn operation_id(&self) -> &'static str {
        match self {
            HandlerId::ListUsers => "getUsers",
            HandlerId::GetUser => "getUser",
            HandlerId::CreateUser => "createUser",
            HandlerId::UpdateUser => "updateUser",
            HandlerId::DeleteUser => "deleteUser",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            HandlerId::ListUsers => "Get all users.",
            HandlerId::GetUser => "Get user by ID.",
            HandlerId::CreateUser => "Create a new user",
            HandlerId::UpdateUser => "Update user by ID.",
            HandlerId::DeleteUser => "Delete user by ID.",
        }
    }

    /// Status and description of the successful response.
    pub fn success(&self) -> (StatusCode, &'static str) {
        match self {
            HandlerId::ListUsers | HandlerId::GetUser => (StatusCode::OK, "A successful response"),
            HandlerId::CreateUser => (StatusCode::CREATED, "user created successfully"),
            HandlerId::UpdateUser => (StatusCode::OK, "user updated successfully"),
            HandlerId::DeleteUser => (StatusCode::OK, "user deleted successfully"),
        }
    }
}

/// Response produced by a handler; the pipeline never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl HandlerResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Business logic invoked with requests that passed validation.
///
/// # Implementations
///
/// - [`crate::api::handlers::users::UserController`] - user CRUD
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HandlerDispatch: Send + Sync {
    /// Runs `handler`. Errors are passed to the client unchanged.
    async fn dispatch(
        &self,
        handler: HandlerId,
        request: ValidatedRequest,
    ) -> Result<HandlerResponse, AppError>;
}
