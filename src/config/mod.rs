//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! rules file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → UrlManager::from_config (compiled rules)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → rebuilt UrlManager sent to the owner
//!     → SharedManager swaps it in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - Manager-level fields have defaults; each rule names its route
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AppConfig, LogFormat, LoggingConfig, NestedRuleConfig, RuleEntry, StaticRuleConfig};
pub use validation::ValidationError;
