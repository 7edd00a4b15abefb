//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Start (controller.rs):
//!     NotStarted → StartPending → open log sink → spawn worker → Running
//!
//! Stop (controller.rs):
//!     stop control → StopPending → stop signal → reactor unwinds
//!         → worker joined → Stopped
//!
//! Worker (worker.rs):
//!     current-thread runtime → acceptor + sessions + log heartbeat
//! ```
//!
//! # Design Decisions
//! - Ordered stop: clear controls-accepted, report StopPending, trigger
//! - The control handler never blocks; the join happens on the host thread
//! - A degraded worker (no listener) still counts as Running

pub mod controller;
pub mod shutdown;
pub mod state;
pub(crate) mod worker;

pub use controller::{ControlHandle, ServiceController, ServiceError};
pub use shutdown::StopSignal;
pub use state::ServiceState;
