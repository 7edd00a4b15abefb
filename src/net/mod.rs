//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, address reuse)
//!     → session subsystem (handshake, heartbeat cycle, teardown)
//! ```
//!
//! # Design Decisions
//! - At most one acceptor is active per reactor lifetime
//! - No connection limit: the endpoint accepts any number of clients

pub mod listener;

pub use listener::{Acceptor, ListenerError};
