//! URL rules for parameters of unbounded depth.
//!
//! A nested rule turns `("site/category", {lang: "en", path: "books/sci-fi"})`
//! into `cat/lang/en/books/sci-fi` and back, so a tree path of any depth is
//! served by a single rule.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::AppConfig;
pub use routing::{NestedPathRule, NoMatch, Params, RouteMatch, UrlManager, UrlRule};
