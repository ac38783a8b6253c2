//! OpenAPI 3.0 document derived from the pipeline.
//!
//! The document is read-only over the route table and schema registry; it is
//! computed once at startup and served by the docs handlers.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde_json::{Map, Value, json};

use crate::pipeline::Pipeline;
use crate::pipeline::router::Route;
use crate::pipeline::schema::{FieldRule, ObjectSchema, Schema, Target};

/// Document metadata rendered into `info` and `servers`.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub contact: String,
    pub server_url: String,
}

/// Builds the OpenAPI document for every registered route.
pub fn describe(pipeline: &Pipeline, info: &ApiInfo) -> Value {
    let base = pipeline.routes().base_path();
    let mut paths: BTreeMap<String, Map<String, Value>> = BTreeMap::new();

    for route in pipeline.routes().routes() {
        let path = format!("{base}{}", route.pattern.to_template());
        let path = if path.is_empty() { "/".to_string() } else { path };

        let schema = route.schema.and_then(|key| pipeline.schemas().lookup(&key));

        paths.entry(path).or_default().insert(
            route.method.as_str().to_ascii_lowercase(),
            operation(route, schema),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": info.title,
            "description": info.description,
            "version": info.version,
            "contact": { "name": info.contact },
        },
        "servers": [{ "url": info.server_url }],
        "paths": paths,
    })
}

fn operation(route: &Route, schema: Option<&Schema>) -> Value {
    let mut op = Map::new();
    op.insert("summary".into(), json!(route.handler.summary()));
    op.insert("description".into(), json!(route.handler.summary()));
    op.insert("operationId".into(), json!(route.handler.operation_id()));

    let mut parameters: Vec<Value> = route
        .pattern
        .param_names()
        .map(|name| {
            let declared = schema
                .and_then(|s| s.target(Target::Params))
                .and_then(|fields| fields.fields().find(|(n, _)| *n == name))
                .map(|(_, rule)| rule_schema(rule))
                .unwrap_or_else(|| json!({ "type": "string" }));

            json!({
                "in": "path",
                "name": name,
                "required": true,
                "schema": declared,
            })
        })
        .collect();

    if let Some(query) = schema.and_then(|s| s.target(Target::Query)) {
        parameters.extend(query.fields().map(|(name, rule)| {
            json!({
                "in": "query",
                "name": name,
                "required": rule.required,
                "schema": rule_schema(rule),
            })
        }));
    }

    if !parameters.is_empty() {
        op.insert("parameters".into(), Value::Array(parameters));
    }

    if let Some(body) = schema.and_then(|s| s.target(Target::Body)) {
        let content = json!({ "schema": object_schema(body) });
        op.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": {
                    "application/json": content,
                    "application/x-www-form-urlencoded": content,
                },
            }),
        );
    }

    let mut responses = Map::new();
    let (status, description) = route.handler.success();
    responses.insert(status.as_str().into(), json!({ "description": description }));
    if schema.is_some() {
        responses.insert(
            StatusCode::BAD_REQUEST.as_str().into(),
            json!({ "description": "Bad request - Invalid input data" }),
        );
    }
    if route.pattern.param_names().next().is_some() {
        responses.insert(
            StatusCode::NOT_FOUND.as_str().into(),
            json!({ "description": "User not found" }),
        );
    }
    op.insert("responses".into(), Value::Object(responses));

    Value::Object(op)
}

fn object_schema(fields: &ObjectSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for (name, rule) in fields.fields() {
        properties.insert(name.to_string(), rule_schema(rule));
        if rule.required {
            required.push(Value::String(name.to_string()));
        }
    }

    let mut out = Map::new();
    out.insert("type".into(), json!("object"));
    out.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".into(), Value::Array(required));
    }
    Value::Object(out)
}

fn rule_schema(rule: &FieldRule) -> Value {
    if let Some(nested) = &rule.nested {
        return object_schema(nested);
    }

    let mut out = Map::new();
    out.insert("type".into(), json!(rule.kind.as_str()));
    if let Some(format) = rule.format {
        out.insert("format".into(), json!(format.as_str()));
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::users_pipeline;

    fn info() -> ApiInfo {
        ApiInfo {
            title: "Test API".to_string(),
            description: "Test".to_string(),
            version: "1.0.0".to_string(),
            contact: "Tester".to_string(),
            server_url: "http://localhost:3000".to_string(),
        }
    }

    fn document() -> Value {
        describe(&users_pipeline("/v1/users").unwrap(), &info())
    }

    #[test]
    fn test_document_header() {
        let doc = document();

        assert_eq!(doc["openapi"], "3.0.0");
        assert_eq!(doc["info"]["title"], "Test API");
        assert_eq!(doc["info"]["contact"]["name"], "Tester");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");
    }

    #[test]
    fn test_every_route_is_listed() {
        let doc = document();

        let root = doc["paths"]["/v1/users"].as_object().unwrap();
        let mut methods: Vec<&String> = root.keys().collect();
        methods.sort();
        assert_eq!(methods, vec!["get", "post"]);

        let item = doc["paths"]["/v1/users/{id}"].as_object().unwrap();
        let mut methods: Vec<&String> = item.keys().collect();
        methods.sort();
        assert_eq!(methods, vec!["delete", "get", "put"]);
    }

    #[test]
    fn test_create_body_lists_required_fields_and_formats() {
        let doc = document();
        let schema = &doc["paths"]["/v1/users"]["post"]["requestBody"]["content"]
            ["application/json"]["schema"];

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name", "email", "password"]));
        assert_eq!(schema["properties"]["email"]["format"], "email");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(doc["paths"]["/v1/users"]["post"]["responses"]["201"]["description"], "user created successfully");
    }

    #[test]
    fn test_update_body_has_no_required_fields() {
        let doc = document();
        let schema = &doc["paths"]["/v1/users/{id}"]["put"]["requestBody"]["content"]
            ["application/json"]["schema"];

        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"]["email"]["format"], "email");
    }

    #[test]
    fn test_path_and_query_parameters() {
        let doc = document();
        let params = doc["paths"]["/v1/users/{id}"]["get"]["parameters"]
            .as_array()
            .unwrap();

        assert_eq!(params[0]["in"], "path");
        assert_eq!(params[0]["name"], "id");
        assert_eq!(params[0]["required"], true);
        assert_eq!(params[1]["in"], "query");
        assert_eq!(params[1]["name"], "id");
        assert_eq!(params[1]["required"], false);
    }

    #[test]
    fn test_list_operation_has_no_parameters() {
        let doc = document();
        let op = &doc["paths"]["/v1/users"]["get"];

        assert!(op.get("parameters").is_none());
        assert!(op.get("requestBody").is_none());
        assert_eq!(op["operationId"], "getUsers");
        assert!(op["responses"].get("400").is_none());
    }

    #[test]
    fn test_document_is_deterministic() {
        assert_eq!(document(), document());
    }
}
