//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject rules that could never build or match a path
//! - Check pre-nested keys are usable as literal path segments
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{AppConfig, NestedRuleConfig, RuleEntry, StaticRuleConfig};

/// A semantic problem in the rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{rule}: route must not be empty")]
    EmptyRoute { rule: String },

    #[error("{rule}: nested_key must not be empty")]
    EmptyNestedKey { rule: String },

    #[error("{rule}: separator must not be empty")]
    EmptySeparator { rule: String },

    #[error("{rule}: pre-nested keys must not be empty")]
    EmptyPreNestedKey { rule: String },

    #[error("{rule}: pre-nested key `{key}` must not contain `/`")]
    SlashInPreNestedKey { rule: String, key: String },

    #[error("{rule}: pre-nested key `{key}` is listed more than once")]
    DuplicatePreNestedKey { rule: String, key: String },

    #[error("{rule}: `{key}` is both the nested key and a pre-nested key")]
    NestedKeyIsPreNested { rule: String, key: String },

    #[error("{rule}: `{prefix}` must not start or end with `/`")]
    SlashAroundPrefix { rule: String, prefix: String },

    #[error("ampersand must not be empty")]
    EmptyAmpersand,
}

/// Validate the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.ampersand.is_empty() {
        errors.push(ValidationError::EmptyAmpersand);
    }

    for entry in &config.rules {
        let result = match entry {
            RuleEntry::Nested(rule) => validate_nested_rule(rule),
            RuleEntry::Static(rule) => validate_static_rule(rule),
        };
        if let Err(mut rule_errors) = result {
            errors.append(&mut rule_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_nested_rule(config: &NestedRuleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let rule = rule_label(&config.route);

    check_prefix(&rule, &config.route, &mut errors);
    if !config.friendly_alias.is_empty() {
        check_prefix(&rule, &config.friendly_alias, &mut errors);
    }

    if config.nested_key.is_empty() {
        errors.push(ValidationError::EmptyNestedKey { rule: rule.clone() });
    }
    if config.separator.is_empty() {
        errors.push(ValidationError::EmptySeparator { rule: rule.clone() });
    }

    let mut seen = HashSet::new();
    for key in &config.pre_nested_keys {
        if key.is_empty() {
            errors.push(ValidationError::EmptyPreNestedKey { rule: rule.clone() });
            continue;
        }
        if key.contains('/') {
            errors.push(ValidationError::SlashInPreNestedKey {
                rule: rule.clone(),
                key: key.clone(),
            });
        }
        if *key == config.nested_key {
            errors.push(ValidationError::NestedKeyIsPreNested {
                rule: rule.clone(),
                key: key.clone(),
            });
        }
        if !seen.insert(key.as_str()) {
            errors.push(ValidationError::DuplicatePreNestedKey {
                rule: rule.clone(),
                key: key.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_static_rule(config: &StaticRuleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let rule = rule_label(&config.route);

    check_prefix(&rule, &config.route, &mut errors);
    if let Some(pattern) = &config.pattern {
        check_prefix(&rule, pattern, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn rule_label(route: &str) -> String {
    if route.is_empty() {
        "<unnamed rule>".to_string()
    } else {
        format!("rule `{}`", route)
    }
}

fn check_prefix(rule: &str, prefix: &str, errors: &mut Vec<ValidationError>) {
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyRoute {
            rule: rule.to_string(),
        });
    } else if prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::SlashAroundPrefix {
            rule: rule.to_string(),
            prefix: prefix.to_string(),
        });
    }
}
