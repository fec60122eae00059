//! Rule chain: URL creation and path resolution.
//!
//! # Responsibilities
//! - Store compiled rules in declaration order
//! - Ask each rule in turn until one builds or matches
//! - Supply the query encoder rules use for leftover parameters
//! - Percent-encode path segments of built URLs, decode them when parsing
//! - Return the result or an explicit no-route error
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) rule scan (acceptable for typical rule counts)
//! - First match wins; rules never see each other
//! - Live reload replaces the whole manager through `SharedManager`

use std::cell::RefCell;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::config::schema::{AppConfig, RuleEntry};
use crate::config::ConfigError;
use crate::routing::nested::NestedPathRule;
use crate::routing::query::{parse_query, FormEncoder};
use crate::routing::rule::{Params, QueryEncoder, RouteMatch, UrlRule};
use crate::routing::static_rule::StaticRule;

/// Errors surfaced once every rule has declined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No rule can build a URL for the route with these parameters.
    #[error("no rule can build a URL for route `{0}`")]
    NoRoute(String),

    /// No rule matches the path.
    #[error("no rule matches path `{0}`")]
    NoMatchingRule(String),

    /// The path is not valid percent-encoded UTF-8.
    #[error("path `{0}` is not valid UTF-8 after decoding")]
    InvalidPath(String),
}

/// Ordered rule chain.
#[derive(Debug, Default)]
pub struct UrlManager {
    rules: Vec<Box<dyn UrlRule>>,
    encoder: FormEncoder,
    base_url: String,
}

impl UrlManager {
    /// Create an empty manager. `base_url` is stored without trailing `/`.
    pub fn new(base_url: impl Into<String>, ampersand: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            rules: Vec::new(),
            encoder: FormEncoder::new(ampersand),
            base_url,
        }
    }

    /// Compile every configured rule, in order.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut manager = Self::new(config.base_url.clone(), config.ampersand.clone());
        for entry in &config.rules {
            match entry {
                RuleEntry::Nested(rule) => manager.add_rule(NestedPathRule::new(rule.clone())?),
                RuleEntry::Static(rule) => manager.add_rule(StaticRule::new(rule.clone())?),
            }
        }
        Ok(manager)
    }

    /// Append a rule; it is tried after every rule added before it.
    pub fn add_rule(&mut self, rule: impl UrlRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for `route` from the first rule that accepts it.
    ///
    /// Every path segment is percent-encoded, so values holding `?`, `#`
    /// or `%` come back unchanged from `parse_url`.
    pub fn create_url(&self, route: &str, params: &Params) -> Result<String, RouteError> {
        for rule in &self.rules {
            let encoder = DeferredQuery::new(&self.encoder);
            match rule.build(route, params, &encoder) {
                Ok(path) => {
                    let mut url = format!("{}/{}", self.base_url, encode_segments(&path));
                    let query = encoder.into_query();
                    if !query.is_empty() {
                        url.push('?');
                        url.push_str(&query);
                    }
                    tracing::debug!(route, rule = rule.route(), %url, "URL created");
                    return Ok(url);
                }
                Err(reason) => {
                    tracing::trace!(route, rule = rule.route(), %reason, "Rule declined build");
                }
            }
        }

        tracing::debug!(route, "No rule can build URL");
        Err(RouteError::NoRoute(route.to_string()))
    }

    /// Resolve a request path (optionally with query string) to a route.
    ///
    /// Query parameters are merged into the result; parameters recovered
    /// from the path take precedence.
    pub fn parse_url(&self, raw: &str) -> Result<RouteMatch, RouteError> {
        let raw = self.strip_base_url(raw);
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let decoded =
            urlencoding::decode(path).map_err(|_| RouteError::InvalidPath(path.to_string()))?;
        let path = decoded.trim_start_matches('/');

        for rule in &self.rules {
            match rule.match_path(path) {
                Ok(found) => {
                    let mut params = parse_query(query, "&");
                    params.extend(found.params);
                    tracing::debug!(path, route = %found.route, "Path resolved");
                    return Ok(RouteMatch::new(found.route, params));
                }
                Err(reason) => {
                    tracing::trace!(path, rule = rule.route(), %reason, "Rule declined path");
                }
            }
        }

        tracing::debug!(path, "No rule matches path");
        Err(RouteError::NoMatchingRule(path.to_string()))
    }

    fn strip_base_url<'a>(&self, raw: &'a str) -> &'a str {
        if self.base_url.is_empty() {
            return raw;
        }
        match raw.strip_prefix(self.base_url.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => rest,
            _ => raw,
        }
    }
}

/// Holds the query aside so a rule's output is a bare path whose segments
/// can be escaped before the query is appended.
struct DeferredQuery<'a> {
    inner: &'a FormEncoder,
    query: RefCell<String>,
}

impl<'a> DeferredQuery<'a> {
    fn new(inner: &'a FormEncoder) -> Self {
        Self {
            inner,
            query: RefCell::new(String::new()),
        }
    }

    fn into_query(self) -> String {
        self.query.into_inner()
    }
}

impl QueryEncoder for DeferredQuery<'_> {
    fn encode(&self, params: &Params) -> String {
        *self.query.borrow_mut() = self.inner.encode(params);
        String::new()
    }
}

/// Percent-encode each `/`-separated segment; empty segments are kept.
fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// A manager that can be replaced while readers hold the previous one.
#[derive(Debug)]
pub struct SharedManager {
    current: ArcSwap<UrlManager>,
}

impl SharedManager {
    pub fn new(manager: UrlManager) -> Self {
        Self {
            current: ArcSwap::from_pointee(manager),
        }
    }

    /// Snapshot of the live manager.
    pub fn load(&self) -> Arc<UrlManager> {
        self.current.load_full()
    }

    /// Swap in a rebuilt manager.
    pub fn replace(&self, manager: UrlManager) {
        self.current.store(Arc::new(manager));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{NestedRuleConfig, StaticRuleConfig};

    fn params(entries: &[(&str, &str)]) -> Params {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn manager() -> UrlManager {
        let mut manager = UrlManager::new("", "&");
        manager.add_rule(
            NestedPathRule::new(
                NestedRuleConfig::new("site/category", "path")
                    .with_alias("cat")
                    .with_pre_nested(["lang"]),
            )
            .unwrap(),
        );
        manager.add_rule(
            NestedPathRule::new(NestedRuleConfig::new("site/category", "path").with_alias("all"))
                .unwrap(),
        );
        manager.add_rule(
            StaticRule::new(StaticRuleConfig {
                route: "site/index".into(),
                pattern: Some("home".into()),
            })
            .unwrap(),
        );
        manager
    }

    #[test]
    fn test_first_applicable_rule_builds() {
        let manager = manager();

        let url = manager
            .create_url("site/category", &params(&[("lang", "en"), ("path", "a/b")]))
            .unwrap();
        assert_eq!(url, "/cat/lang/en/a/b");

        // Without `lang` the first rule declines and the second one applies
        let url = manager
            .create_url("site/category", &params(&[("path", "a/b"), ("page", "2")]))
            .unwrap();
        assert_eq!(url, "/all/a/b?page=2");
    }

    #[test]
    fn test_no_route() {
        let manager = manager();
        assert_eq!(
            manager.create_url("site/category", &params(&[("lang", "en")])),
            Err(RouteError::NoRoute("site/category".into()))
        );
    }

    #[test]
    fn test_parse_url_merges_query() {
        let manager = manager();
        let found = manager.parse_url("/cat/lang/en/a/b?page=2&lang=fr").unwrap();
        assert_eq!(found.route, "site/category");
        assert_eq!(
            found.params,
            params(&[("lang", "en"), ("path", "a/b"), ("page", "2")])
        );
    }

    #[test]
    fn test_parse_url_decodes_path() {
        let manager = manager();
        let found = manager.parse_url("/all/red%20shoes/size").unwrap();
        assert_eq!(found.params["path"], "red shoes/size");
    }

    #[test]
    fn test_parse_url_no_match() {
        let manager = manager();
        assert_eq!(
            manager.parse_url("/nowhere/x"),
            Err(RouteError::NoMatchingRule("nowhere/x".into()))
        );
        assert!(matches!(
            manager.parse_url("/all/%FF"),
            Err(RouteError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_reserved_characters_survive_round_trip() {
        let mut manager = UrlManager::new("", "&");
        manager.add_rule(
            NestedPathRule::new(
                NestedRuleConfig::new("docs/page", "node")
                    .with_pre_nested(["tag"])
                    .with_separator("."),
            )
            .unwrap(),
        );

        let input = params(&[("tag", "c#"), ("node", "what?.x"), ("q", "1")]);
        let url = manager.create_url("docs/page", &input).unwrap();
        assert_eq!(url, "/docs/page/tag/c%23/what%3F/x?q=1");
        assert_eq!(manager.parse_url(&url).unwrap().params, input);

        for node in ["a%20b.c", "sale.100%25", "a%2Fb.c"] {
            let input = params(&[("tag", "t"), ("node", node)]);
            let url = manager.create_url("docs/page", &input).unwrap();
            assert_eq!(
                manager.parse_url(&url).unwrap().params,
                input,
                "value {:?} changed through {}",
                node,
                url
            );
        }
    }

    #[test]
    fn test_empty_nested_segment_is_kept() {
        let mut manager = UrlManager::new("", "&");
        manager.add_rule(NestedPathRule::new(NestedRuleConfig::new("tree", "node")).unwrap());

        let url = manager.create_url("tree", &params(&[("node", "")])).unwrap();
        assert_eq!(url, "/tree/");
        assert_eq!(manager.parse_url(&url).unwrap().params["node"], "");
    }

    #[test]
    fn test_base_url() {
        let mut manager = UrlManager::new("/app/", "&");
        manager.add_rule(
            NestedPathRule::new(NestedRuleConfig::new("docs/view", "page")).unwrap(),
        );
        assert_eq!(manager.base_url(), "/app");

        let url = manager
            .create_url("docs/view", &params(&[("page", "guide/intro")]))
            .unwrap();
        assert_eq!(url, "/app/docs/view/guide/intro");

        let found = manager.parse_url(&url).unwrap();
        assert_eq!(found.params["page"], "guide/intro");

        // A path that merely shares the prefix is not rebased
        assert!(manager.parse_url("/application/docs/view/x").is_err());
    }

    #[test]
    fn test_shared_manager_swap() {
        let shared = SharedManager::new(UrlManager::new("", "&"));
        let before = shared.load();
        assert!(before.is_empty());

        shared.replace(manager());
        assert_eq!(shared.load().len(), 3);
        assert!(before.is_empty());
    }
}
