//! Transport entry point for resource routes.

use axum::{
    body::{self, Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, header},
};
use serde_json::json;

use crate::error::AppError;
use crate::pipeline::dispatch::HandlerResponse;
use crate::pipeline::router::RouteMatch;
use crate::pipeline::validation::IncomingRequest;
use crate::state::AppState;
use crate::utils::request_body::{parse_body, parse_query};

/// Routes a request through the pipeline.
///
/// Installed as the router fallback, so every request not claimed by a fixed
/// route (health, docs) reaches it.
///
/// # Flow
///
/// 1. Match method and path; unknown routes return `404` without reading the body
/// 2. Read the body up to `AppState::max_body_bytes`; larger bodies return `413`
/// 3. Decode the query string and the body by content type
/// 4. Run the route's validation steps; failures return `400` with every violation
/// 5. Dispatch the handler and return its response unchanged
pub async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<HandlerResponse, AppError> {
    let (parts, body) = request.into_parts();

    let RouteMatch { route, params } = state
        .pipeline
        .match_route(&parts.method, parts.uri.path())?;

    let bytes = read_body(&parts.headers, body, state.max_body_bytes).await?;

    let request = IncomingRequest::new(
        params,
        parse_query(parts.uri.query()),
        parse_body(&parts.headers, &bytes)?,
    );

    state
        .pipeline
        .run(route, request, state.dispatcher.as_ref())
        .await
}

/// Buffers the body, rejecting it once it exceeds `limit` bytes.
///
/// A declared `Content-Length` over the limit is rejected before any byte is
/// read. `to_bytes` otherwise fails only past the limit or on a dropped
/// connection, which has nobody left to answer.
async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, AppError> {
    let too_large = || {
        AppError::payload_too_large("Request body too large", json!({ "limit": limit }))
    };

    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(too_large());
    }

    body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, limit, "Request body rejected");
        too_large()
    })
}
