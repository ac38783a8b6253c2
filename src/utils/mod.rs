//! Helpers used by the HTTP layer and services.
//!
//! - [`request_body`] - Query string and body decoding by content type
//! - [`password`] - Password digests

pub mod password;
pub mod request_body;
