//! Configuration schema definitions.
//!
//! This module defines the rule file structure. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Root configuration: manager settings plus the ordered rule list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix placed before every generated URL (e.g., "/app").
    pub base_url: String,

    /// Separator between query pairs in generated URLs.
    pub ampersand: String,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Rules, tried in declaration order.
    pub rules: Vec<RuleEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            ampersand: "&".to_string(),
            logging: LoggingConfig::default(),
            rules: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One entry of the rule list, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleEntry {
    Nested(NestedRuleConfig),
    Static(StaticRuleConfig),
}

impl RuleEntry {
    pub fn route(&self) -> &str {
        match self {
            RuleEntry::Nested(c) => &c.route,
            RuleEntry::Static(c) => &c.route,
        }
    }
}

/// Nested path rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NestedRuleConfig {
    /// Canonical route (e.g., "site/category").
    pub route: String,

    /// Parameter holding the unbounded-depth value.
    #[serde(alias = "nested")]
    pub nested_key: String,

    /// Path prefix used instead of the route; empty means the route itself.
    #[serde(default, alias = "route_friendly")]
    pub friendly_alias: String,

    /// Parameters written as name/value pairs before the nested segments.
    #[serde(default)]
    pub pre_nested_keys: Vec<String>,

    /// Separator between levels of the nested value.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    "/".to_string()
}

impl NestedRuleConfig {
    pub fn new(route: impl Into<String>, nested_key: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            nested_key: nested_key.into(),
            friendly_alias: String::new(),
            pre_nested_keys: Vec::new(),
            separator: default_separator(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.friendly_alias = alias.into();
        self
    }

    pub fn with_pre_nested<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pre_nested_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Fixed-path rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StaticRuleConfig {
    /// Canonical route.
    pub route: String,

    /// Literal path; defaults to the route.
    #[serde(default)]
    pub pattern: Option<String>,
}
