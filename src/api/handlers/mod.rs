//! HTTP request handlers.
//!
//! - [`dispatch`] - Pipeline entry point for the users resource
//! - [`users`] - User business logic behind the pipeline
//! - [`docs`] - OpenAPI document and documentation page
//! - [`health`] - Health check

pub mod dispatch;
pub mod docs;
pub mod health;
pub mod users;

pub use dispatch::dispatch_handler;
pub use docs::{openapi_handler, swagger_handler};
pub use health::health_handler;
pub use users::UserController;
