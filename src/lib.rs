//! pulsed — heartbeat keep-alive service daemon.
//!
//! A long-running background process that participates in a host service
//! lifecycle (start / stop control) and, while running, operates a TCP server
//! that keeps every connected client alive with a fixed `"heartbeat"` payload
//! once per interval until the client disconnects or the service is stopped.
//!
//! ```text
//! host control ──▶ lifecycle (controller, state machine)
//!                      │ spawns worker thread (current-thread runtime)
//!                      ▼
//!                  net (acceptor) ──▶ session (handshake, heartbeat emitter)
//!
//! cross-cutting: config, observability (tracing + service log sink), host
//! ```

pub mod config;
pub mod host;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod session;

pub use config::ServiceConfig;
pub use host::{ControlCode, StatusReporter};
pub use lifecycle::controller::ServiceController;
pub use lifecycle::state::ServiceState;
