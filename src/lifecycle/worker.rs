//! Worker thread: hosts the reactor for one service lifetime.
//!
//! # Responsibilities
//! - Build the current-thread runtime (the reactor) and drive it
//! - Start the acceptor; a failed bind degrades the service, never kills it
//! - Emit the periodic service log heartbeat
//! - Wind down once the stop signal fires and no session remains
//!
//! # Design Decisions
//! - One dedicated thread, one single-threaded runtime: every accept,
//!   timer and write completion runs serially, so sessions need no locking
//! - A fresh runtime per service start is the restart discipline; dropping
//!   it at the end cancels anything still pending

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::lifecycle::controller::ServiceContext;
use crate::net::Acceptor;

/// Spawn the worker thread. Fails only if the OS refuses the thread.
pub(crate) fn spawn(context: Arc<ServiceContext>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("pulsed-worker".to_string())
        .spawn(move || run(context))
}

fn run(context: Arc<ServiceContext>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            // Degraded-but-alive: the service stays Running (serving nothing)
            // until a stop is requested, mirroring a failed bind.
            tracing::error!(error = %error, "Failed to build worker runtime");
            context.log.line(&format!("Failed to build worker runtime: {}", error));
            while !context.stop.is_triggered() {
                thread::sleep(Duration::from_millis(100));
            }
            return;
        }
    };

    context.log.line("Service worker thread started");
    runtime.block_on(serve(Arc::clone(&context)));
    context.log.line("Service worker thread stopping");
    // Dropping the runtime cancels anything still pending (the log ticker, a
    // stalled write); components treat that as an expected shutdown signal.
}

async fn serve(context: Arc<ServiceContext>) {
    tokio::spawn(log_heartbeat(Arc::clone(&context)));

    if context.config.listener.enabled {
        match Acceptor::bind(&context.config.listener) {
            Ok(acceptor) => {
                tokio::spawn(acceptor.run(Arc::clone(&context)));
            }
            Err(error) => {
                // Fatal to the server, not to the service: up, serving nothing.
                tracing::error!(error = %error, "Failed to open listening endpoint");
                context
                    .log
                    .line(&format!("Failed to open listening endpoint: {}", error));
            }
        }
    }

    context.stop.triggered().await;
    // Every session observes the same latch at its next timer wait; the
    // accept loop has already stopped re-arming. Return once none remain.
    context.sessions.wait_idle().await;
}

/// Periodic operator log heartbeat, independent of any client session.
async fn log_heartbeat(context: Arc<ServiceContext>) {
    let mut ticker = tokio::time::interval(context.config.heartbeat.interval());
    // interval() fires immediately; the first heartbeat belongs one full
    // interval after start.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => context.log.line("Service is running (heartbeat)"),
            _ = context.stop.triggered() => break,
        }
    }
}
