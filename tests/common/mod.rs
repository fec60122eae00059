//! Shared helpers for integration tests.

use nested_route::config::parse_config;
use nested_route::{Params, UrlManager};

/// Rule file used across tests.
#[allow(dead_code)]
pub const SHOP_RULES: &str = r#"
base_url = "/shop"

[[rules]]
kind = "nested"
route = "catalog/browse"
nested_key = "category"
friendly_alias = "browse"
pre_nested_keys = ["lang", "sort"]

[[rules]]
kind = "nested"
route = "catalog/browse"
nested_key = "category"
friendly_alias = "c"

[[rules]]
kind = "nested"
route = "docs/page"
nested_key = "node"
separator = "."

[[rules]]
kind = "static"
route = "site/index"
pattern = "home"
"#;

/// Build a parameter set from literal pairs.
pub fn params(entries: &[(&str, &str)]) -> Params {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Compile a manager from TOML text.
#[allow(dead_code)]
pub fn manager_from(toml: &str) -> UrlManager {
    let config = parse_config(toml).unwrap();
    UrlManager::from_config(&config).unwrap()
}
