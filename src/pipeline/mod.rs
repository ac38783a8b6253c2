//! Request validation and dispatch pipeline.
//!
//! The pipeline is built once at startup and never mutated afterwards:
//!
//! - [`schema`] - Field rules and the schema registry
//! - [`router`] - Route table with path parameter binding
//! - [`validation`] - Checks request parts against a schema
//! - [`dispatch`] - Handler identifiers and the business-logic seam
//! - [`openapi`] - OpenAPI document derived from routes and schemas
//!
//! # Request Flow
//!
//! 1. [`Pipeline::match_route`] finds the route and binds path parameters
//! 2. [`Pipeline::run`] evaluates the route's steps in order, stopping at the
//!    first failing step
//! 3. The handler is dispatched with the [`ValidatedRequest`]

pub mod dispatch;
pub mod openapi;
pub mod router;
pub mod schema;
pub mod validation;

use axum::http::Method;

use crate::error::{AppError, ConfigError};
use dispatch::{HandlerDispatch, HandlerResponse};
use router::{Route, RouteMatch, RouteNotFound, RouteTable, Step};
use schema::SchemaRegistry;
use validation::{IncomingRequest, ValidatedRequest};

/// Immutable route and schema tables.
#[derive(Debug)]
pub struct Pipeline {
    schemas: SchemaRegistry,
    routes: RouteTable,
}

impl Pipeline {
    /// Combines the tables after checking every schema reference resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSchema`] if a route names a key that is
    /// not registered.
    pub fn new(schemas: SchemaRegistry, routes: RouteTable) -> Result<Self, ConfigError> {
        for route in routes.routes() {
            if let Some(key) = route.schema
                && schemas.lookup(&key).is_none()
            {
                return Err(ConfigError::UnknownSchema {
                    method: route.method.to_string(),
                    pattern: route.pattern.to_string(),
                    key: key.to_string(),
                });
            }
        }

        Ok(Self { schemas, routes })
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, RouteNotFound> {
        self.routes.match_route(method, path)
    }

    /// Evaluates the route's steps and dispatches its handler.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing every violation when a
    /// validation step fails; the handler is not called in that case.
    /// Handler errors are returned unchanged.
    pub async fn run<D>(
        &self,
        route: &Route,
        mut request: IncomingRequest,
        dispatcher: &D,
    ) -> Result<HandlerResponse, AppError>
    where
        D: HandlerDispatch + ?Sized,
    {
        for step in &route.steps {
            match step {
                Step::Validate(key) => {
                    let Some(schema) = self.schemas.lookup(key) else {
                        continue;
                    };
                    request = match validation::validate(schema, request) {
                        Ok(checked) => checked.into_inner(),
                        Err(errors) => {
                            tracing::info!(
                                method = %route.method,
                                pattern = %route.pattern,
                                errors = errors.len(),
                                "Request rejected by validation"
                            );
                            return Err(errors.into());
                        }
                    };
                }
            }
        }

        tracing::debug!(
            method = %route.method,
            pattern = %route.pattern,
            handler = ?route.handler,
            "Dispatching request"
        );

        dispatcher
            .dispatch(route.handler, ValidatedRequest::new(request))
            .await
    }
}
