//! Fixed-path rule.
//!
//! Maps one literal path to one route. Every build parameter is an extra
//! and ends up in the query string.

use crate::config::schema::StaticRuleConfig;
use crate::config::validation::validate_static_rule;
use crate::config::ConfigError;
use crate::routing::rule::{append_query, NoMatch, Params, QueryEncoder, RouteMatch, UrlRule};

#[derive(Debug, Clone)]
pub struct StaticRule {
    route: String,
    pattern: String,
}

impl StaticRule {
    pub fn new(config: StaticRuleConfig) -> Result<Self, ConfigError> {
        validate_static_rule(&config).map_err(ConfigError::Validation)?;
        let pattern = config.pattern.unwrap_or_else(|| config.route.clone());
        Ok(Self {
            route: config.route,
            pattern,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl UrlRule for StaticRule {
    fn route(&self) -> &str {
        &self.route
    }

    fn build(
        &self,
        route: &str,
        params: &Params,
        encoder: &dyn QueryEncoder,
    ) -> Result<String, NoMatch> {
        if route != self.route {
            return Err(NoMatch::RouteMismatch(route.to_string()));
        }
        Ok(append_query(self.pattern.clone(), params, encoder))
    }

    fn match_path(&self, path: &str) -> Result<RouteMatch, NoMatch> {
        if path == self.pattern {
            Ok(RouteMatch::new(self.route.clone(), Params::new()))
        } else {
            Err(NoMatch::PatternMismatch(self.pattern.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_rule() {
        let rule = StaticRule::new(StaticRuleConfig {
            route: "site/index".into(),
            pattern: Some("home".into()),
        })
        .unwrap();

        let mut params = Params::new();
        params.insert("ref".into(), "mail".into());
        let encoder = |p: &Params| {
            p.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        };

        assert_eq!(rule.build("site/index", &params, &encoder).unwrap(), "home?ref=mail");
        assert!(rule.build("site/about", &params, &encoder).is_err());

        let m = rule.match_path("home").unwrap();
        assert_eq!(m.route, "site/index");
        assert!(m.params.is_empty());
        assert_eq!(
            rule.match_path("home/more"),
            Err(NoMatch::PatternMismatch("home".into()))
        );
    }

    #[test]
    fn test_pattern_defaults_to_route() {
        let rule = StaticRule::new(StaticRuleConfig {
            route: "site/about".into(),
            pattern: None,
        })
        .unwrap();
        assert_eq!(rule.pattern(), "site/about");
        assert!(rule.match_path("site/about").is_ok());
    }
}
