//! Service lifecycle controller.
//!
//! # Responsibilities
//! - Drive the `ServiceState` machine and report every transition to the host
//! - Spawn the worker thread that runs the reactor
//! - Translate a stop control into the stop signal and reactor teardown
//! - Join the worker thread and report the final state
//!
//! # Design Decisions
//! - `on_control` never blocks: the host may invoke it while holding a lock
//! - The join is unbounded: an unresponsive worker is a fatal condition the
//!   host must learn about through a late status report, not a premature one
//! - Status-report failures are cosmetic and never change state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use thiserror::Error;

use crate::config::ServiceConfig;
use crate::host::{ControlCode, StatusReporter};
use crate::lifecycle::shutdown::StopSignal;
use crate::lifecycle::state::ServiceState;
use crate::lifecycle::worker;
use crate::observability::ServiceLog;
use crate::session::tracker::SessionTracker;

/// Error type for lifecycle operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("service was already started")]
    AlreadyStarted,
}

/// Shared state handed to the worker, the acceptor and every session.
///
/// This replaces process-wide mutable globals: the controller owns the
/// context and everything else borrows it through an `Arc`.
pub struct ServiceContext {
    pub(crate) config: ServiceConfig,
    pub(crate) stop: StopSignal,
    pub(crate) log: ServiceLog,
    pub(crate) sessions: SessionTracker,
    state: Mutex<ServiceState>,
    controls_accepted: AtomicBool,
    reporter: Box<dyn StatusReporter>,
}

impl ServiceContext {
    fn new(config: ServiceConfig, reporter: Box<dyn StatusReporter>) -> Self {
        Self {
            config,
            stop: StopSignal::new(),
            log: ServiceLog::closed(),
            sessions: SessionTracker::new(),
            state: Mutex::new(ServiceState::NotStarted),
            controls_accepted: AtomicBool::new(false),
            reporter,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        *self.lock_state()
    }

    fn lock_state(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `next` and report it upward. Illegal moves are rejected
    /// silently; the state machine never runs backwards.
    fn transition(&self, next: ServiceState) {
        {
            let mut state = self.lock_state();
            if !state.can_transition_to(next) {
                tracing::debug!(from = %*state, to = %next, "Rejected state transition");
                return;
            }
            *state = next;
        }
        if let Err(error) = self.reporter.report(next) {
            // Cosmetic: logged, never retried, never cause to change state.
            tracing::debug!(error = %error, state = %next, "Status report failed");
        }
        self.log.line(&format!("Service state: {}", next));
    }

    /// Handle one control code from the host. Only stop is meaningful; every
    /// other code is accepted and ignored.
    pub fn on_control(&self, code: ControlCode) {
        match code {
            ControlCode::Stop => self.request_stop(),
            other => tracing::debug!(code = ?other, "Ignoring control code"),
        }
    }

    fn request_stop(&self) {
        // The flag is raised only while Running, so this swap both gates the
        // no-op cases (not running, second stop) and clears controls-accepted
        // in one step.
        if !self.controls_accepted.swap(false, Ordering::SeqCst) {
            tracing::debug!(state = %self.state(), "Stop control ignored");
            return;
        }

        self.transition(ServiceState::StopPending);
        // One latch behind two cancellation channels: it wakes a worker
        // blocked waiting for stop, and it unwinds the reactor's pending
        // accepts and timer waits.
        self.stop.trigger();
    }
}

/// Top-level state machine governing start / run / stop as observed by the
/// host environment.
pub struct ServiceController {
    context: Arc<ServiceContext>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ServiceController {
    /// Create a controller in `NotStarted`. Nothing runs yet.
    pub fn new(config: ServiceConfig, reporter: Box<dyn StatusReporter>) -> Self {
        Self {
            context: Arc::new(ServiceContext::new(config, reporter)),
            worker: None,
        }
    }

    /// Host start entry point: `NotStarted → StartPending → Running`.
    ///
    /// `StartPending` is reported before any real work so the host does not
    /// time out the start request. The log sink is opened best-effort. If the
    /// worker thread cannot be created the service goes straight to
    /// `Stopped` and the error is returned.
    pub fn on_start(&mut self) -> Result<(), ServiceError> {
        if self.context.state() != ServiceState::NotStarted {
            return Err(ServiceError::AlreadyStarted);
        }
        self.context.transition(ServiceState::StartPending);

        if self.context.config.service_log.enabled {
            self.context
                .log
                .open(&self.context.config.service_log.resolved_path());
        }

        match worker::spawn(Arc::clone(&self.context)) {
            Ok(handle) => self.worker = Some(handle),
            Err(error) => {
                self.context.transition(ServiceState::Stopped);
                return Err(ServiceError::WorkerSpawn(error));
            }
        }

        self.context.transition(ServiceState::Running);
        // A stop request only becomes meaningful from here on.
        self.context.controls_accepted.store(true, Ordering::SeqCst);
        self.context.log.line("=== Service Started ===");
        Ok(())
    }

    /// Deliver a control code. See [`ControlHandle`] for cross-thread use.
    pub fn on_control(&self, code: ControlCode) {
        self.context.on_control(code);
    }

    /// Cloneable, non-blocking handle for the control-signal thread.
    pub fn control_handle(&self) -> ControlHandle {
        ControlHandle {
            context: Arc::clone(&self.context),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.context.state()
    }

    /// Block until the worker thread has fully exited, then report
    /// `Stopped`. The wait is unbounded on purpose; the worker exits once
    /// the stop signal has unwound the reactor.
    pub fn wait_until_stopped(&mut self) -> ServiceState {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("Worker thread panicked");
                self.context.log.line("Worker thread panicked");
            }
            self.context.transition(ServiceState::Stopped);
            self.context.log.line("=== Service Stopped ===");
        }
        self.context.state()
    }
}

/// Handle for delivering host control codes from another thread.
#[derive(Clone)]
pub struct ControlHandle {
    context: Arc<ServiceContext>,
}

impl ControlHandle {
    /// Deliver one control code. Never blocks.
    pub fn on_control(&self, code: ControlCode) {
        self.context.on_control(code);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.context.state()
    }
}
