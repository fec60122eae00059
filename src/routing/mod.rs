//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! URL creation:
//!     (route, params)
//!     → router.rs (try rules in order)
//!     → rule.build (prefix, name/value pairs, nested segments)
//!     → query.rs (leftover params after "?")
//!     → Return: URL or NoRoute
//!
//! Path resolution:
//!     raw path
//!     → router.rs (strip base URL, split query, decode)
//!     → rule.match_path (state machine over segments)
//!     → Return: RouteMatch or NoMatchingRule
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex: prefix checks and segment splitting only
//! - Deterministic: same input always yields the same URL or match
//! - First match wins (declaration order)

pub mod nested;
pub mod query;
pub mod router;
pub mod rule;
pub mod static_rule;

pub use nested::NestedPathRule;
pub use query::FormEncoder;
pub use router::{RouteError, SharedManager, UrlManager};
pub use rule::{NoMatch, Params, QueryEncoder, RouteMatch, UrlRule};
pub use static_rule::StaticRule;
