//! Data Transfer Objects for API responses.
//!
//! Request bodies are not deserialized into DTOs: they are validated as JSON
//! values by [`crate::pipeline::validation`] before any handler runs.

pub mod health;
pub mod user;
