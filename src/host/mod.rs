//! Host service-control boundary.
//!
//! # Data Flow
//! ```text
//! host environment
//!     → on_start / on_control (lifecycle controller entry points)
//!     ← StatusReporter (every ServiceState transition)
//!
//! Foreground host:
//!     Ctrl+C / SIGTERM (signals.rs) → ControlCode::Stop
//! ```

pub mod reporter;
pub mod signals;

pub use reporter::{ControlCode, StatusReporter, TracingReporter};
