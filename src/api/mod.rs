//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers and the user controller
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route and schema declarations for the users resource

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
