//! Stop signal shared between the control handler and the worker.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// One-way stop latch for the whole service.
///
/// Exactly one writer (the control handler) triggers it; the worker thread,
/// the acceptor and every session only observe it. Within one service
/// lifetime it transitions `Clear → Signaled` once and never back.
///
/// Observation is a broadcast channel so that triggering never blocks the
/// control handler, plus an atomic flag so that observers subscribing after
/// the trigger still see it.
pub struct StopSignal {
    tx: broadcast::Sender<()>,
    signaled: AtomicBool,
}

impl StopSignal {
    /// Create a new, clear stop signal.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            signaled: AtomicBool::new(false),
        }
    }

    /// Flip the latch. Idempotent, never blocks.
    pub fn trigger(&self) {
        self.signaled.store(true, Ordering::SeqCst);
        // No receivers is fine: late observers check the flag.
        let _ = self.tx.send(());
    }

    /// Whether the latch has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.signaled.load(Ordering::SeqCst)
    }

    /// Resolve once the latch is triggered.
    ///
    /// Safe to call before or after `trigger`; the flag is re-checked after
    /// subscribing so the signal cannot be missed between the two.
    pub async fn triggered(&self) {
        if self.is_triggered() {
            return;
        }
        let mut rx = self.tx.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn latch_is_one_way() {
        let stop = StopSignal::new();
        assert!(!stop.is_triggered());

        stop.trigger();
        assert!(stop.is_triggered());

        // A second trigger is harmless and changes nothing.
        stop.trigger();
        assert!(stop.is_triggered());
    }

    #[tokio::test]
    async fn observer_wakes_on_trigger() {
        let stop = Arc::new(StopSignal::new());
        let observer = {
            let stop = Arc::clone(&stop);
            tokio::spawn(async move { stop.triggered().await })
        };

        stop.trigger();
        tokio::time::timeout(Duration::from_secs(1), observer)
            .await
            .expect("observer should wake")
            .expect("observer task should not panic");
    }

    #[tokio::test]
    async fn late_observer_sees_trigger() {
        let stop = StopSignal::new();
        stop.trigger();
        // Subscribing after the fact must still resolve immediately.
        tokio::time::timeout(Duration::from_secs(1), stop.triggered())
            .await
            .expect("late observer should see the latch");
    }
}
