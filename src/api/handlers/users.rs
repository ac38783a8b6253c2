//! Handlers for the users resource.
//!
//! Requests arrive here already validated by the pipeline; the controller
//! only maps them onto [`UserService`] calls.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::dto::user::{DeletedUser, UserView};
use crate::application::services::UserService;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::pipeline::dispatch::{HandlerDispatch, HandlerId, HandlerResponse};
use crate::pipeline::validation::ValidatedRequest;

/// Dispatches user handlers onto [`UserService`].
pub struct UserController<R: UserRepository> {
    service: Arc<UserService<R>>,
}

impl<R: UserRepository> UserController<R> {
    pub fn new(service: Arc<UserService<R>>) -> Self {
        Self { service }
    }

    /// `GET /v1/users`
    async fn list_users(&self) -> Result<HandlerResponse, AppError> {
        let users: Vec<UserView> = self
            .service
            .list_users()
            .await?
            .into_iter()
            .map(UserView::from)
            .collect();

        respond(StatusCode::OK, &users)
    }

    /// `GET /v1/users/{id}`
    ///
    /// Returns 404 if the user does not exist or the id is not numeric.
    async fn get_user(&self, request: &ValidatedRequest) -> Result<HandlerResponse, AppError> {
        let id = path_id(request)?;
        let user = self.service.get_user(id).await?;

        respond(StatusCode::OK, &UserView::from(user))
    }

    /// `POST /v1/users`
    ///
    /// # Request Body
    ///
    /// ```json
    /// {
    ///   "name": "John",
    ///   "email": "john.doe@example.com",
    ///   "password": "password"
    /// }
    /// ```
    async fn create_user(&self, request: &ValidatedRequest) -> Result<HandlerResponse, AppError> {
        let body = request.body();
        let user = self
            .service
            .create_user(
                required_text(body, "name")?,
                required_text(body, "email")?,
                &required_text(body, "password")?,
            )
            .await?;

        respond(StatusCode::CREATED, &UserView::from(user))
    }

    /// `PUT /v1/users/{id}`
    ///
    /// All body fields are optional; only the provided ones change.
    async fn update_user(&self, request: &ValidatedRequest) -> Result<HandlerResponse, AppError> {
        let id = path_id(request)?;
        let body = request.body();
        let password = text(body, "password");

        let user = self
            .service
            .update_user(
                id,
                text(body, "name"),
                text(body, "email"),
                password.as_deref(),
            )
            .await?;

        respond(StatusCode::OK, &UserView::from(user))
    }

    /// `DELETE /v1/users/{id}`
    async fn delete_user(&self, request: &ValidatedRequest) -> Result<HandlerResponse, AppError> {
        let id = path_id(request)?;
        self.service.delete_user(id).await?;

        respond(StatusCode::OK, &DeletedUser { deleted: id })
    }
}

#[async_trait]
impl<R: UserRepository + 'static> HandlerDispatch for UserController<R> {
    async fn dispatch(
        &self,
        handler: HandlerId,
        request: ValidatedRequest,
    ) -> Result<HandlerResponse, AppError> {
        match handler {
            HandlerId::ListUsers => self.list_users().await,
            HandlerId::GetUser => self.get_user(&request).await,
            HandlerId::CreateUser => self.create_user(&request).await,
            HandlerId::UpdateUser => self.update_user(&request).await,
            HandlerId::DeleteUser => self.delete_user(&request).await,
        }
    }
}

fn respond<T: Serialize>(status: StatusCode, body: &T) -> Result<HandlerResponse, AppError> {
    let body = serde_json::to_value(body).map_err(|e| {
        AppError::internal(
            "Failed to serialize response",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(HandlerResponse::new(status, body))
}

/// Reads the `id` path parameter; non-numeric ids cannot name a user.
fn path_id(request: &ValidatedRequest) -> Result<u64, AppError> {
    let raw = request
        .params()
        .get("id")
        .ok_or_else(|| AppError::bad_request("Missing user id", json!({})))?;

    raw.parse()
        .map_err(|_| AppError::not_found("User not found", json!({ "id": raw })))
}

fn text(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn required_text(body: &Value, field: &str) -> Result<String, AppError> {
    text(body, field).ok_or_else(|| {
        AppError::bad_request(
            "Validation failed",
            json!({ "errors": [{ "target": "body", "field": field, "rule": "required" }] }),
        )
    })
}
