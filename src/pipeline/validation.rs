//! Checks request parts against a [`Schema`].
//!
//! Every declared target is checked and all violations are collected before
//! returning. Accepted values are passed through exactly as the transport
//! produced them.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::pipeline::schema::{FieldKind, FieldRule, Format, ObjectSchema, Rule, Schema, Target};

/// A request as produced by the transport, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingRequest {
    /// Path parameters bound by the router.
    pub params: BTreeMap<String, String>,
    /// Flat query string mapping.
    pub query: BTreeMap<String, String>,
    /// Parsed body; an empty object when the request had none.
    pub body: Value,
}

impl IncomingRequest {
    pub fn new(
        params: BTreeMap<String, String>,
        query: BTreeMap<String, String>,
        body: Value,
    ) -> Self {
        Self {
            params,
            query,
            body,
        }
    }
}

/// A request that passed every validation step of its route.
///
/// Only the pipeline constructs it, so handlers can rely on their schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest(IncomingRequest);

impl ValidatedRequest {
    pub(crate) fn new(request: IncomingRequest) -> Self {
        Self(request)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.0.params
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.0.query
    }

    pub fn body(&self) -> &Value {
        &self.0.body
    }

    pub fn into_inner(self) -> IncomingRequest {
        self.0
    }
}

/// One field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub target: Target,
    /// Field name; nested members use a dotted path such as `address.city`.
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

/// Validates `request` against `schema`.
///
/// # Errors
///
/// Returns every [`ValidationError`] found across all declared targets.
pub fn validate(
    schema: &Schema,
    request: IncomingRequest,
) -> Result<ValidatedRequest, Vec<ValidationError>> {
    let errors = collect_errors(schema, &request);
    if errors.is_empty() {
        Ok(ValidatedRequest::new(request))
    } else {
        Err(errors)
    }
}

/// Returns all violations of `schema` in `request` without consuming it.
pub fn collect_errors(schema: &Schema, request: &IncomingRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (target, fields) in schema.targets() {
        match target {
            Target::Params => check_strings(target, fields, &request.params, &mut errors),
            Target::Query => check_strings(target, fields, &request.query, &mut errors),
            Target::Body => match &request.body {
                Value::Object(body) => check_object(target, "", fields, body, &mut errors),
                _ => errors.push(ValidationError {
                    target,
                    field: String::new(),
                    rule: Rule::Type,
                    message: "\"value\" must be of type object".to_string(),
                }),
            },
        }
    }

    errors
}

/// A value under inspection; path and query parts only carry text.
#[derive(Clone, Copy)]
enum FieldValue<'a> {
    Text(&'a str),
    Json(&'a Value),
}

impl<'a> FieldValue<'a> {
    fn as_text(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Json(Value::String(s)) => Some(s.as_str()),
            FieldValue::Json(_) => None,
        }
    }
}

fn check_strings(
    target: Target,
    fields: &ObjectSchema,
    values: &BTreeMap<String, String>,
    errors: &mut Vec<ValidationError>,
) {
    for (name, rule) in fields.fields() {
        let value = values.get(name).map(|v| FieldValue::Text(v));
        check_field(target, name, rule, value, errors);
    }
}

fn check_object(
    target: Target,
    prefix: &str,
    fields: &ObjectSchema,
    values: &Map<String, Value>,
    errors: &mut Vec<ValidationError>,
) {
    for (name, rule) in fields.fields() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        let value = values.get(name).map(FieldValue::Json);
        check_field(target, &path, rule, value, errors);
    }
}

fn check_field(
    target: Target,
    path: &str,
    rule: &FieldRule,
    value: Option<FieldValue<'_>>,
    errors: &mut Vec<ValidationError>,
) {
    let mut fail = |rule: Rule, message: String| {
        errors.push(ValidationError {
            target,
            field: path.to_string(),
            rule,
            message,
        })
    };

    let Some(value) = value else {
        if rule.required {
            fail(Rule::Required, format!("\"{path}\" is required"));
        }
        return;
    };

    if !kind_matches(rule.kind, value) {
        let message = match rule.kind {
            FieldKind::Object => format!("\"{path}\" must be of type object"),
            kind => format!("\"{path}\" must be a {}", kind.as_str()),
        };
        fail(Rule::Type, message);
        return;
    }

    if rule.kind == FieldKind::String && value.as_text() == Some("") {
        fail(Rule::Empty, format!("\"{path}\" is not allowed to be empty"));
        return;
    }

    if let (Some(format), Some(text)) = (rule.format, value.as_text())
        && !format_matches(format, text)
    {
        fail(
            Rule::Format,
            format!("\"{path}\" must be a valid {}", format.as_str()),
        );
        return;
    }

    if let (Some(nested), FieldValue::Json(Value::Object(members))) = (&rule.nested, value) {
        check_object(target, path, nested, members, errors);
    }
}

/// Type acceptance. Numbers and booleans may arrive as text; `null` never matches.
fn kind_matches(kind: FieldKind, value: FieldValue<'_>) -> bool {
    match kind {
        FieldKind::String => value.as_text().is_some(),
        FieldKind::Number => match value {
            FieldValue::Json(Value::Number(_)) => true,
            _ => value
                .as_text()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .is_some_and(f64::is_finite),
        },
        FieldKind::Boolean => match value {
            FieldValue::Json(Value::Bool(_)) => true,
            _ => value
                .as_text()
                .is_some_and(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")),
        },
        FieldKind::Object => matches!(value, FieldValue::Json(Value::Object(_))),
    }
}

fn format_matches(format: Format, text: &str) -> bool {
    match format {
        Format::Email => is_email(text),
    }
}

/// Syntactic address check; the domain needs at least two labels.
fn is_email(text: &str) -> bool {
    if !text.validate_email() {
        return false;
    }

    text.rsplit_once('@').is_some_and(|(_, domain)| {
        domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
    })
}
