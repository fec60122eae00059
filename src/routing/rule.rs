//! Common rule interface.
//!
//! # Responsibilities
//! - Define the `UrlRule` capability shared by every rule kind
//! - Define the `NoMatch` outcome and the `RouteMatch` result
//! - Define the query encoding seam the manager supplies to rules
//!
//! # Design Decisions
//! - `NoMatch` is an expected outcome, not a failure; it still carries the
//!   reason so the manager can log why a rule declined
//! - Parse results are returned by value, never written into shared state

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Request parameters keyed by name.
pub type Params = BTreeMap<String, String>;

/// Reason a rule declined an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoMatch {
    /// Build was asked for a different route.
    #[error("route `{0}` is handled by another rule")]
    RouteMismatch(String),

    /// Build params lack the nested key.
    #[error("nested parameter `{0}` is missing")]
    MissingNested(String),

    /// Build params lack a pre-nested key.
    #[error("pre-nested parameter `{0}` is missing")]
    MissingPreNested(String),

    /// Path does not start with the rule's prefix.
    #[error("path does not start with `{0}/`")]
    PrefixMismatch(String),

    /// Path is not the literal pattern of a fixed-path rule.
    #[error("path is not `{0}`")]
    PatternMismatch(String),

    /// Path has another segment where a pre-nested name was expected.
    #[error("expected segment `{expected}`, found `{found}`")]
    UnexpectedSegment { expected: String, found: String },

    /// Path ends before the pre-nested sequence is complete.
    #[error("path ends before pre-nested parameter `{0}`")]
    PathTooShort(String),
}

/// Route and parameters recovered from a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Canonical route, never the friendly alias.
    pub route: String,
    pub params: Params,
}

impl RouteMatch {
    pub fn new(route: impl Into<String>, params: Params) -> Self {
        Self {
            route: route.into(),
            params,
        }
    }
}

/// Serializes parameters a rule did not consume into a query string.
pub trait QueryEncoder {
    /// Returns the encoded query without the leading `?`; empty when there
    /// is nothing to encode.
    fn encode(&self, params: &Params) -> String;
}

impl<F> QueryEncoder for F
where
    F: Fn(&Params) -> String,
{
    fn encode(&self, params: &Params) -> String {
        self(params)
    }
}

/// A bidirectional URL rule.
pub trait UrlRule: Send + Sync + std::fmt::Debug {
    /// Canonical route this rule serves.
    fn route(&self) -> &str;

    /// Turns a route and parameter set into a path (no leading `/`).
    fn build(
        &self,
        route: &str,
        params: &Params,
        encoder: &dyn QueryEncoder,
    ) -> Result<String, NoMatch>;

    /// Turns a decoded path without query string back into a route and
    /// parameter set.
    fn match_path(&self, path: &str) -> Result<RouteMatch, NoMatch>;
}

/// Appends `?query` to `path` when the encoder produced anything.
pub(crate) fn append_query(mut path: String, remaining: &Params, encoder: &dyn QueryEncoder) -> String {
    let query = encoder.encode(remaining);
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query);
    }
    path
}
