//! Heartbeat emitter: the per-session wait → write cycle.
//!
//! # Responsibilities
//! - Arm a one-shot timer for the configured interval
//! - On fire, write exactly one fixed payload to the connection
//! - Repeat indefinitely until cancelled or the connection fails
//!
//! # Design Decisions
//! - Strict alternation: never two writes without a timer wait between them
//! - Cancellation is observed only at the timer wait; a write already in
//!   flight when shutdown begins completes (or fails) first
//! - No timeout on the write itself: a stalled peer occupies its session
//!   until the connection layer reports an error

use std::io;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::lifecycle::shutdown::StopSignal;

/// The fixed keep-alive payload. The server never sends anything else.
pub const HEARTBEAT_PAYLOAD: &[u8] = b"heartbeat";

/// Why a heartbeat cycle ended.
#[derive(Debug)]
pub enum CycleEnd {
    /// Whole-server shutdown cancelled the pending timer wait.
    Cancelled,
    /// The peer closed the connection, seen on a write attempt.
    PeerClosed,
    /// Any other I/O failure on the connection.
    Io(io::Error),
}

/// Drive the heartbeat cycle until cancelled or the connection fails.
pub async fn run<W>(writer: &mut W, interval: Duration, stop: &StopSignal) -> CycleEnd
where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = stop.triggered() => return CycleEnd::Cancelled,
        }

        let written = async {
            writer.write_all(HEARTBEAT_PAYLOAD).await?;
            writer.flush().await
        }
        .await;

        if let Err(error) = written {
            return classify_write_error(error);
        }
    }
}

/// Separate a clean peer-side close from other I/O failures.
fn classify_write_error(error: io::Error) -> CycleEnd {
    match error.kind() {
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::WriteZero => CycleEnd::PeerClosed,
        _ => CycleEnd::Io(error),
    }
}
