//! Session subsystem: one task per accepted connection.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → handshake (pin peer address, configure socket)
//!     → heartbeat.rs (wait → write cycle)
//!     → teardown (idempotent, logged exactly once)
//!
//! Session states:
//!     Accepting → Active → Closed
//! ```
//!
//! # Design Decisions
//! - One task owns the whole session; the runtime's task machinery keeps it
//!   alive while any operation is outstanding
//! - Teardown is a state transition guarded by the current-phase check; a
//!   transition attempted from Closed is rejected silently
//! - A failed session is abandoned, never reconnected

pub mod heartbeat;
pub mod tracker;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;

use crate::lifecycle::controller::ServiceContext;
use crate::session::heartbeat::CycleEnd;
use crate::session::tracker::SessionGuard;

/// Per-session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Accepting,
    Active,
    Closed,
}

/// Live state for one accepted client connection.
pub struct Session {
    stream: TcpStream,
    peer: Option<SocketAddr>,
    phase: SessionPhase,
    guard: SessionGuard,
    context: Arc<ServiceContext>,
}

impl Session {
    /// Construct a session for an accepted connection and start it.
    pub fn spawn(stream: TcpStream, context: Arc<ServiceContext>) {
        let session = Session {
            stream,
            peer: None,
            phase: SessionPhase::Accepting,
            guard: context.sessions.track(),
            context,
        };
        tokio::spawn(session.run());
    }

    async fn run(mut self) {
        if let Err(error) = self.handshake() {
            // Terminal: logged, no heartbeat is ever scheduled.
            tracing::warn!(session = %self.guard.id(), error = %error, "Handshake failed");
            self.context.log.line(&format!("Handshake failed: {}", error));
            self.phase = SessionPhase::Closed;
            return;
        }

        self.phase = SessionPhase::Active;
        if let Some(peer) = self.peer {
            tracing::info!(session = %self.guard.id(), peer = %peer, "Client connected");
            self.context.log.line(&format!("Client connected: {}", peer));
        }

        let interval = self.context.config.heartbeat.interval();
        let end = heartbeat::run(&mut self.stream, interval, &self.context.stop).await;
        self.close(end);
    }

    /// Socket-level handshake: pin the peer address and configure the stream.
    fn handshake(&mut self) -> io::Result<()> {
        let peer = self.stream.peer_addr()?;
        self.stream.set_nodelay(true)?;
        self.peer = Some(peer);
        Ok(())
    }

    /// First entry wins; any later close attempt returns immediately.
    fn close(&mut self, end: CycleEnd) {
        if self.phase == SessionPhase::Closed {
            return;
        }
        self.phase = SessionPhase::Closed;

        match &end {
            // Shutdown-induced: expected, never logged as a failure.
            CycleEnd::Cancelled => {
                tracing::debug!(session = %self.guard.id(), "Session cancelled by shutdown");
            }
            CycleEnd::PeerClosed => {
                tracing::info!(session = %self.guard.id(), "Peer closed the connection");
            }
            CycleEnd::Io(error) => {
                tracing::warn!(session = %self.guard.id(), error = %error, "Session write failed");
                self.context.log.line(&format!("Session error: {}", error));
            }
        }

        // Best-effort peer address; the connection may already be gone.
        match self.peer {
            Some(peer) => self.context.log.line(&format!("Client disconnected: {}", peer)),
            None => self.context.log.line("Client disconnected"),
        }
    }
}
