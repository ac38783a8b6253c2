//! # Users API
//!
//! A users CRUD service built with Axum whose requests pass through a
//! declarative validation and dispatch pipeline.
//!
//! ## Architecture
//!
//! - **Pipeline** ([`pipeline`]) - Schema registry, route table, validation and
//!   OpenAPI generation
//! - **Domain Layer** ([`domain`]) - User entity and repository trait
//! - **Application Layer** ([`application`]) - User service
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory user store
//! - **API Layer** ([`api`]) - Route declarations, handlers, DTOs and middleware
//!
//! ## Request Flow
//!
//! 1. The route table matches method and path and binds path parameters
//! 2. Query string and body are decoded (JSON or URL-encoded form)
//! 3. The route's schema is checked; all violations are returned as `400`
//! 4. The handler runs only for requests that passed validation
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl -X POST localhost:3000/v1/users \
//!   -H 'content-type: application/json' \
//!   -d '{"name":"John","email":"john.doe@example.com","password":"password"}'
//! ```
//!
//! API documentation is served at `/swagger` (document at `/swagger.json`).
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod pipeline;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, ConfigError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::routes::users_pipeline;
    pub use crate::error::{AppError, ConfigError};
    pub use crate::pipeline::Pipeline;
    pub use crate::pipeline::dispatch::{HandlerDispatch, HandlerId, HandlerResponse};
    pub use crate::pipeline::openapi::ApiInfo;
    pub use crate::pipeline::validation::{ValidatedRequest, ValidationError};
    pub use crate::state::AppState;
}
