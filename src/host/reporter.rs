//! Host control boundary types.
//!
//! # Responsibilities
//! - Define the control codes the host may deliver
//! - Define how lifecycle transitions are reported back to the host
//!
//! # Design Decisions
//! - Only stop is meaningful; every other code is accepted and ignored
//! - Reporting is fallible by contract, but failures are cosmetic: the
//!   lifecycle never changes because a report did not get through

use std::sync::Arc;

use crate::lifecycle::state::ServiceState;

/// Control codes delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// Stop the service.
    Stop,
    /// Liveness poll; answered implicitly by the status reports.
    Interrogate,
    /// Any other host- or platform-specific code.
    Other(u32),
}

/// Reports lifecycle transitions upward to the host environment.
pub trait StatusReporter: Send + Sync {
    /// Report that the service entered `state`.
    fn report(&self, state: ServiceState) -> std::io::Result<()>;
}

impl<T: StatusReporter + ?Sized> StatusReporter for Arc<T> {
    fn report(&self, state: ServiceState) -> std::io::Result<()> {
        (**self).report(state)
    }
}

/// Reporter for foreground runs: transitions surface as tracing events.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, state: ServiceState) -> std::io::Result<()> {
        tracing::info!(state = %state, "Service status");
        Ok(())
    }
}
