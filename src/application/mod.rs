//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for the
//! handler dispatch layer.
//!
//! - [`services::user_service::UserService`] - User CRUD

pub mod services;
