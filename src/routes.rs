//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`        - Health check (route and schema tables)
//! - `GET  /swagger.json`  - OpenAPI document
//! - `GET  /swagger`       - Documentation page
//! - everything else       - Users pipeline (see [`crate::api::routes`]);
//!   requests it does not match get `404`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - Pipeline routes buffer at most the configured size and
//!   answer `413` beyond it; unmatched routes never read the body
//! - **Path normalization** - Trailing slash trimming, applied in
//!   [`crate::server::run`]

use crate::api::handlers::{dispatch_handler, health_handler, openapi_handler, swagger_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `max_body_bytes` - request body size limit for pipeline routes
/// - `log_headers` - include request headers in trace spans
pub fn app_router(state: AppState, max_body_bytes: usize, log_headers: bool) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/swagger.json", get(openapi_handler))
        .route("/swagger", get(swagger_handler))
        .fallback(dispatch_handler)
        .with_state(state.with_body_limit(max_body_bytes))
        .layer(tracing::layer(log_headers))
}
