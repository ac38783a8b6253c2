//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{HealthChecks, HealthResponse, TableCheck};
use crate::state::AppState;

/// Returns service status with the size of the route and schema tables.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "routes": { "status": "ok", "count": 5, "message": "5 routes registered" },
///     "schemas": { "status": "ok", "count": 4, "message": "4 schemas registered" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let checks = HealthChecks {
        routes: TableCheck::new(state.pipeline.routes().len(), "routes", true),
        schemas: TableCheck::new(state.pipeline.schemas().len(), "schemas", false),
    };

    let status = if checks.routes.status == "ok" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}
