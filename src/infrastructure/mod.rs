//! Infrastructure layer implementing the domain's repository interfaces.
//!
//! - [`persistence`] - User storage

pub mod persistence;
