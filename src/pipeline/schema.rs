//! Declarative validation rules and the registry that stores them.
//!
//! Rules are plain data so the OpenAPI composer can read them back. A field
//! that a schema does not mention is never validated nor rejected.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// The part of a request a set of rules applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Named path segments bound by the router.
    Params,
    /// Query string parameters.
    Query,
    /// Parsed request body.
    Body,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Params => "params",
            Target::Query => "query",
            Target::Body => "body",
        }
    }
}

/// Value type a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
        }
    }
}

/// Semantic refinement applied after the type check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Email => "email",
        }
    }
}

/// The clause of a [`FieldRule`] that a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Required,
    Type,
    Empty,
    Format,
}

/// Constraint for a single field.
///
/// Declared with struct literals, usually starting from
/// [`FieldRule::required`] or [`FieldRule::optional`]:
///
/// ```ignore
/// FieldRule {
///     format: Some(Format::Email),
///     ..FieldRule::required(FieldKind::String)
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub format: Option<Format>,
    /// Rules for the members of an object field.
    pub nested: Option<ObjectSchema>,
}

impl FieldRule {
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
            format: None,
            nested: None,
        }
    }

    pub const fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            format: None,
            nested: None,
        }
    }
}

/// Ordered field rules for one object-shaped value.
///
/// Declaration order is the order in which violations are reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldRule)>,
}

impl ObjectSchema {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, FieldRule)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Validation rules of one route, grouped by request part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    targets: BTreeMap<Target, ObjectSchema>,
}

impl Schema {
    /// Builds a schema from its targets. A repeated target replaces the earlier one.
    pub fn new(targets: impl IntoIterator<Item = (Target, ObjectSchema)>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    /// Declared targets in evaluation order (params, query, body).
    pub fn targets(&self) -> impl Iterator<Item = (Target, &ObjectSchema)> {
        self.targets.iter().map(|(target, fields)| (*target, fields))
    }

    pub fn target(&self, target: Target) -> Option<&ObjectSchema> {
        self.targets.get(&target)
    }
}

/// Business operation a schema belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Registry key: `(resource, operation)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey {
    pub resource: &'static str,
    pub operation: Operation,
}

impl RouteKey {
    pub const fn new(resource: &'static str, operation: Operation) -> Self {
        Self {
            resource,
            operation,
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.operation.as_str())
    }
}

/// Startup-built table of schemas keyed by [`RouteKey`].
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<RouteKey, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `schema` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateSchema`] if `key` is already taken.
    pub fn register(&mut self, key: RouteKey, schema: Schema) -> Result<(), ConfigError> {
        match self.schemas.entry(key) {
            Entry::Occupied(_) => Err(ConfigError::DuplicateSchema(key.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(schema);
                Ok(())
            }
        }
    }

    /// Returns the schema for `key`, or `None` when the route is not validated.
    pub fn lookup(&self, key: &RouteKey) -> Option<&Schema> {
        self.schemas.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.schemas.keys()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
