//! Error types for startup configuration and HTTP request handling.
//!
//! [`ConfigError`] is raised while the route and schema tables are built and
//! aborts startup. [`AppError`] is the per-request error rendered as JSON.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::pipeline::router::RouteNotFound;
use crate::pipeline::validation::ValidationError;

/// Invalid route or schema declarations detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("schema already registered for {0}")]
    DuplicateSchema(String),

    #[error("route already registered: {method} {pattern}")]
    DuplicateRoute { method: String, pattern: String },

    #[error("route {method} {pattern} conflicts with existing route {method} {existing}")]
    ConflictingRoute {
        method: String,
        pattern: String,
        existing: String,
    },

    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route {method} {pattern} references unregistered schema {key}")]
    UnknownSchema {
        method: String,
        pattern: String,
        key: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload nested under the `error` key of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Request-level error converted into a JSON response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "Validation failed",
///     "details": { "errors": [] }
///   }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    PayloadTooLarge { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn payload_too_large(message: impl Into<String>, details: Value) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::PayloadTooLarge { message, details } => {
                ("payload_too_large", message, details)
            }
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AppError::bad_request("Validation failed", json!({ "errors": errors }))
    }
}

impl From<RouteNotFound> for AppError {
    fn from(err: RouteNotFound) -> Self {
        AppError::not_found(
            "Route not found",
            json!({ "method": err.method, "path": err.path }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema::{Rule, Target};

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let err: AppError = vec![ValidationError {
            target: Target::Body,
            field: "name".to_string(),
            rule: Rule::Required,
            message: "\"name\" is required".to_string(),
        }]
        .into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let info = err.to_error_info();
        assert_eq!(info.code, "validation_error");
        assert_eq!(info.details["errors"][0]["field"], "name");
        assert_eq!(info.details["errors"][0]["target"], "body");
        assert_eq!(info.details["errors"][0]["rule"], "required");
    }

    #[test]
    fn test_route_not_found_maps_to_404() {
        let err: AppError = RouteNotFound {
            method: "DELETE".to_string(),
            path: "/users/abc/extra".to_string(),
        }
        .into();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_error_info().code, "not_found");
        assert_eq!(err.to_error_info().details["path"], "/users/abc/extra");
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = AppError::payload_too_large("Request body too large", json!({ "limit": 16 }));

        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_error_info().code, "payload_too_large");
        assert_eq!(err.to_error_info().details["limit"], 16);
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::DuplicateRoute {
            method: "GET".to_string(),
            pattern: "/:id".to_string(),
        };
        assert_eq!(err.to_string(), "route already registered: GET /:id");
    }
}
