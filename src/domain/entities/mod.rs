//! Core domain entities.
//!
//! - [`User`] - A stored user
//! - [`NewUser`] - Input for creating a user
//! - [`UserPatch`] - Partial update

pub mod user;

pub use user::{NewUser, User, UserPatch};
