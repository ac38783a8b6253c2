//! Health check response.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// Sizes of the tables the pipeline was built from.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub routes: TableCheck,
    pub schemas: TableCheck,
}

#[derive(Debug, Serialize)]
pub struct TableCheck {
    pub status: &'static str,
    pub count: usize,
    pub message: String,
}

impl TableCheck {
    /// An empty table is only an error when entries are expected.
    pub fn new(count: usize, noun: &str, required: bool) -> Self {
        Self {
            status: if required && count == 0 { "error" } else { "ok" },
            count,
            message: format!("{count} {noun} registered"),
        }
    }
}
