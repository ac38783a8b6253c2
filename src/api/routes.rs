//! Route and schema declarations for the users resource.
//!
//! # Endpoints
//!
//! - `GET    /`      - List users
//! - `POST   /`      - Create a user (body: `name`, `email`, `password`)
//! - `GET    /:id`   - Get a user
//! - `PUT    /:id`   - Update a user (body fields all optional)
//! - `DELETE /:id`   - Delete a user
//!
//! The read and delete schemas check an optional `id` in the query string
//! while the id itself arrives as a path parameter. The mismatch is kept as
//! deployed clients see it today.

use crate::error::ConfigError;
use crate::pipeline::Pipeline;
use crate::pipeline::dispatch::HandlerId;
use crate::pipeline::router::{HttpMethod, RouteTable};
use crate::pipeline::schema::{
    FieldKind, FieldRule, Format, ObjectSchema, Operation, RouteKey, Schema, SchemaRegistry,
    Target,
};

pub const RESOURCE: &str = "users";

pub const CREATE_USER: RouteKey = RouteKey::new(RESOURCE, Operation::Create);
pub const GET_USER: RouteKey = RouteKey::new(RESOURCE, Operation::Read);
pub const UPDATE_USER: RouteKey = RouteKey::new(RESOURCE, Operation::Update);
pub const DELETE_USER: RouteKey = RouteKey::new(RESOURCE, Operation::Delete);

fn create_user() -> Schema {
    Schema::new([(
        Target::Body,
        ObjectSchema::new([
            ("name", FieldRule::required(FieldKind::String)),
            (
                "email",
                FieldRule {
                    format: Some(Format::Email),
                    ..FieldRule::required(FieldKind::String)
                },
            ),
            ("password", FieldRule::required(FieldKind::String)),
        ]),
    )])
}

fn get_user() -> Schema {
    Schema::new([(
        Target::Query,
        ObjectSchema::new([("id", FieldRule::optional(FieldKind::String))]),
    )])
}

fn update_user() -> Schema {
    Schema::new([(
        Target::Body,
        ObjectSchema::new([
            ("name", FieldRule::optional(FieldKind::String)),
            (
                "email",
                FieldRule {
                    format: Some(Format::Email),
                    ..FieldRule::optional(FieldKind::String)
                },
            ),
            ("password", FieldRule::optional(FieldKind::String)),
        ]),
    )])
}

fn delete_user() -> Schema {
    Schema::new([(
        Target::Query,
        ObjectSchema::new([("id", FieldRule::optional(FieldKind::String))]),
    )])
}

/// Builds the users pipeline mounted at `base_path`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any declaration is duplicated or conflicting.
pub fn users_pipeline(base_path: &str) -> Result<Pipeline, ConfigError> {
    let mut schemas = SchemaRegistry::new();
    schemas.register(CREATE_USER, create_user())?;
    schemas.register(GET_USER, get_user())?;
    schemas.register(UPDATE_USER, update_user())?;
    schemas.register(DELETE_USER, delete_user())?;

    let mut routes = RouteTable::new(base_path);
    routes.register(HttpMethod::Get, "/:id", Some(GET_USER), HandlerId::GetUser)?;
    routes.register(HttpMethod::Get, "/", None, HandlerId::ListUsers)?;
    routes.register(HttpMethod::Post, "/", Some(CREATE_USER), HandlerId::CreateUser)?;
    routes.register(
        HttpMethod::Delete,
        "/:id",
        Some(DELETE_USER),
        HandlerId::DeleteUser,
    )?;
    routes.register(HttpMethod::Put, "/:id", Some(UPDATE_USER), HandlerId::UpdateUser)?;

    Pipeline::new(schemas, routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_pipeline_builds() {
        let pipeline = users_pipeline("/v1/users").unwrap();

        assert_eq!(pipeline.routes().len(), 5);
        assert_eq!(pipeline.schemas().len(), 4);
    }

    #[test]
    fn test_each_route_has_expected_schema() {
        let pipeline = users_pipeline("/v1/users").unwrap();

        let cases = [
            (Method::GET, "/v1/users", None),
            (Method::POST, "/v1/users", Some(CREATE_USER)),
            (Method::GET, "/v1/users/1", Some(GET_USER)),
            (Method::PUT, "/v1/users/1", Some(UPDATE_USER)),
            (Method::DELETE, "/v1/users/1", Some(DELETE_USER)),
        ];

        for (method, path, schema) in cases {
            let matched = pipeline.match_route(&method, path).unwrap();
            assert_eq!(matched.route.schema, schema, "{method} {path}");
        }
    }

    #[test]
    fn test_read_schema_targets_query() {
        let pipeline = users_pipeline("/v1/users").unwrap();
        let schema = pipeline.schemas().lookup(&GET_USER).unwrap();

        assert!(schema.target(Target::Query).is_some());
        assert!(schema.target(Target::Params).is_none());
    }
}
