//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Diagnostics:
//!     tracing events → tracing-subscriber (logging.rs, env-filter)
//!
//! Operator log:
//!     lifecycle / connection / error events
//!         → sink.rs (append-only timestamped lines)
//! ```
//!
//! # Design Decisions
//! - Two channels on purpose: sink failures are cosmetic and reported only
//!   through the diagnostic channel, never the other way around

pub mod logging;
pub mod sink;

pub use sink::ServiceLog;
