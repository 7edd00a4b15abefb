//! OS signal handling for foreground runs.
//!
//! # Responsibilities
//! - Register termination handlers (Ctrl+C, and SIGTERM on Unix)
//! - Translate the first termination signal into a stop control
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Registration failure is surfaced to the caller so the process can exit
//!   with the platform error code

use std::io;

/// Block the calling thread until a termination signal arrives.
///
/// Builds a small current-thread runtime of its own; the service worker owns
/// its reactor separately and is not involved.
pub fn block_until_stop_signal() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(wait_for_stop_signal())
}

/// Wait for Ctrl+C or, on Unix, SIGTERM.
pub async fn wait_for_stop_signal() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
