//! Exact-pattern route table.
//!
//! Patterns are `/`-separated segments where `:name` binds any non-empty
//! path component. Overlapping patterns for the same method are rejected at
//! registration, so at most one route can match a request and registration
//! order never matters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use axum::http::Method;

use crate::error::ConfigError;
use crate::pipeline::dispatch::HandlerId;
use crate::pipeline::schema::RouteKey;

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Maps a transport method; anything else can never match a route.
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(HttpMethod::Get),
            Method::POST => Some(HttpMethod::Post),
            Method::PUT => Some(HttpMethod::Put),
            Method::DELETE => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parsed path pattern such as `/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern. `/` is the pattern with no segments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for patterns not starting with
    /// `/`, with empty segments, unnamed parameters or repeated parameter names.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let rest = raw.strip_prefix('/').ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments = Vec::new();
        let mut names = BTreeSet::new();

        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty path segment"));
                }

                match part.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter without a name")),
                    Some(name) => {
                        if !names.insert(name) {
                            return Err(invalid("repeated parameter name"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the pattern with `{name}` placeholders, as OpenAPI paths do.
    pub fn to_template(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        out
    }

    /// True when some path could match both patterns.
    fn overlaps(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }

    fn bind(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(text) if text == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.insert(name.clone(), (*part).to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One pre-handler processing step, evaluated in order with early exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Validate the request against the registered schema.
    Validate(RouteKey),
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: HttpMethod,
    pub pattern: PathPattern,
    pub schema: Option<RouteKey>,
    pub handler: HandlerId,
    pub steps: Vec<Step>,
}

/// A successful match with its bound path parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

/// No route is registered for the request's method and path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no route for {method} {path}")]
pub struct RouteNotFound {
    pub method: String,
    pub path: String,
}

/// Route table mounted under a base path.
#[derive(Debug)]
pub struct RouteTable {
    base_path: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty table. `base_path` is the mount point; `/` or an
    /// empty string mounts at the root.
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            routes: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Registers a route.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPattern`] if the pattern does not parse
    /// - [`ConfigError::DuplicateRoute`] if the same method and pattern exist
    /// - [`ConfigError::ConflictingRoute`] if an existing pattern for the same
    ///   method could match the same paths
    pub fn register(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        schema: Option<RouteKey>,
        handler: HandlerId,
    ) -> Result<(), ConfigError> {
        let pattern = PathPattern::parse(pattern)?;

        for existing in self.routes.iter().filter(|r| r.method == method) {
            if existing.pattern.segments == pattern.segments {
                return Err(ConfigError::DuplicateRoute {
                    method: method.to_string(),
                    pattern: pattern.raw,
                });
            }
            if existing.pattern.overlaps(&pattern) {
                return Err(ConfigError::ConflictingRoute {
                    method: method.to_string(),
                    pattern: pattern.raw,
                    existing: existing.pattern.raw.clone(),
                });
            }
        }

        let steps = schema.into_iter().map(Step::Validate).collect();

        self.routes.push(Route {
            method,
            pattern,
            schema,
            handler,
            steps,
        });
        Ok(())
    }

    /// Finds the route for `method` and `path` and binds its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] if the path is outside the base path or no
    /// registered pattern matches.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, RouteNotFound> {
        let not_found = || RouteNotFound {
            method: method.to_string(),
            path: path.to_string(),
        };

        let method = HttpMethod::from_http(method).ok_or_else(not_found)?;
        let parts = self.split(path).ok_or_else(not_found)?;

        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route
                    .pattern
                    .bind(&parts)
                    .map(|params| RouteMatch { route, params })
            })
            .ok_or_else(not_found)
    }

    /// Strips the base path and splits the remainder into components.
    fn split<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let rest = path.strip_prefix(self.base_path.as_str())?;
        if rest.is_empty() || rest == "/" {
            return Some(Vec::new());
        }
        Some(rest.strip_prefix('/')?.split('/').collect())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
