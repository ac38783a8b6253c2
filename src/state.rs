//! Shared application state injected into handlers.

use serde_json::Value;
use std::sync::Arc;

use crate::api::handlers::UserController;
use crate::application::services::UserService;
use crate::infrastructure::persistence::InMemoryUserRepository;
use crate::pipeline::Pipeline;
use crate::pipeline::dispatch::HandlerDispatch;
use crate::pipeline::openapi::{ApiInfo, describe};

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state cloned into every request.
///
/// Everything here is read-only after startup; the user store behind
/// `dispatcher` does its own locking.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub dispatcher: Arc<dyn HandlerDispatch>,
    /// OpenAPI document computed once from `pipeline`.
    pub openapi: Arc<Value>,
    /// Largest request body the pipeline buffers.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Pipeline, dispatcher: Arc<dyn HandlerDispatch>, info: &ApiInfo) -> Self {
        let openapi = describe(&pipeline, info);

        Self {
            pipeline: Arc::new(pipeline),
            dispatcher,
            openapi: Arc::new(openapi),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_body_limit(self, max_body_bytes: usize) -> Self {
        Self {
            max_body_bytes,
            ..self
        }
    }

    /// Wires the user controller over a fresh in-memory store.
    pub fn in_memory(pipeline: Pipeline, info: &ApiInfo) -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(UserService::new(repository));
        let controller = Arc::new(UserController::new(service));

        Self::new(pipeline, controller, info)
    }
}
