//! Rule for an unbounded-depth path parameter.
//!
//! # Path Grammar
//! ```text
//! <prefix> / <pre_1> / <value_1> / ... / <pre_n> / <value_n> / <seg_1> / ... / <seg_m>
//!
//! prefix      = friendly alias, or the route when no alias is set
//! pre_i       = literal name of the i-th pre-nested parameter
//! seg_1..m    = nested value split on the separator
//! ```
//!
//! # Design Decisions
//! - Pre-nested parameters are written as name/value pairs, not bare values
//! - A missing pre-nested parameter declines the whole build; nothing is
//!   emitted and the caller's parameters are never touched
//! - An empty nested value yields one empty trailing segment (`route/`);
//!   parsing `route/` gives the empty value back

use crate::config::schema::NestedRuleConfig;
use crate::config::validation::validate_nested_rule;
use crate::config::ConfigError;
use crate::routing::rule::{append_query, NoMatch, Params, QueryEncoder, RouteMatch, UrlRule};

/// Maps a separator-joined parameter of any depth onto trailing path
/// segments.
#[derive(Debug, Clone)]
pub struct NestedPathRule {
    config: NestedRuleConfig,
}

impl NestedPathRule {
    /// Create a rule, rejecting configurations that could never match.
    pub fn new(config: NestedRuleConfig) -> Result<Self, ConfigError> {
        validate_nested_rule(&config).map_err(ConfigError::Validation)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NestedRuleConfig {
        &self.config
    }

    /// Path prefix used in URLs: the friendly alias when set, else the route.
    pub fn prefix(&self) -> &str {
        if self.config.friendly_alias.is_empty() {
            &self.config.route
        } else {
            &self.config.friendly_alias
        }
    }
}

impl UrlRule for NestedPathRule {
    fn route(&self) -> &str {
        &self.config.route
    }

    fn build(
        &self,
        route: &str,
        params: &Params,
        encoder: &dyn QueryEncoder,
    ) -> Result<String, NoMatch> {
        if route != self.config.route {
            return Err(NoMatch::RouteMismatch(route.to_string()));
        }
        let nested = params
            .get(&self.config.nested_key)
            .ok_or_else(|| NoMatch::MissingNested(self.config.nested_key.clone()))?;

        let mut segments = vec![self.prefix()];
        for key in &self.config.pre_nested_keys {
            let value = params
                .get(key)
                .ok_or_else(|| NoMatch::MissingPreNested(key.clone()))?;
            segments.push(key);
            segments.push(value);
        }
        segments.extend(nested.split(self.config.separator.as_str()));

        let mut remaining = params.clone();
        remaining.remove(&self.config.nested_key);
        for key in &self.config.pre_nested_keys {
            remaining.remove(key);
        }

        Ok(append_query(segments.join("/"), &remaining, encoder))
    }

    fn match_path(&self, path: &str) -> Result<RouteMatch, NoMatch> {
        let prefix = self.prefix();
        let rest = path
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| NoMatch::PrefixMismatch(prefix.to_string()))?;

        let mut segments = rest.split('/');
        let mut params = Params::new();

        for key in &self.config.pre_nested_keys {
            match segments.next() {
                Some(name) if name == key => {}
                Some(found) => {
                    return Err(NoMatch::UnexpectedSegment {
                        expected: key.clone(),
                        found: found.to_string(),
                    })
                }
                None => return Err(NoMatch::PathTooShort(key.clone())),
            }
            let value = segments
                .next()
                .ok_or_else(|| NoMatch::PathTooShort(key.clone()))?;
            params.insert(key.clone(), value.to_string());
        }

        let nested = segments.collect::<Vec<_>>().join(&self.config.separator);
        params.insert(self.config.nested_key.clone(), nested);

        Ok(RouteMatch::new(self.config.route.clone(), params))
    }
}
