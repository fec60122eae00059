//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Rules and manager produce:
//!     → trace events (rule declined, with reason)
//!     → debug events (URL created, path resolved, no route)
//!     → info/error events (config loaded, reloaded, reload failed)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```

pub mod logging;
