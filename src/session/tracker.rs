//! Session lifetime bookkeeping.
//!
//! # Responsibilities
//! - Generate unique session IDs for tracing
//! - Count live sessions so the worker can wind down only once none remain
//!
//! # Design Decisions
//! - The ID counter lives in the tracker, not in a process-wide static
//! - Relaxed ordering for IDs (uniqueness only); SeqCst for the live count

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Tracks live sessions for orderly shutdown.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    active: Arc<AtomicU64>,
    next_id: Arc<AtomicU64>,
}

impl SessionTracker {
    /// Create a new tracker with no live sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new live session. The returned guard decrements the count
    /// when dropped, which happens exactly once per session task.
    pub fn track(&self) -> SessionGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        SessionGuard {
            active: Arc::clone(&self.active),
            id: SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1),
        }
    }

    /// Number of live sessions.
    pub fn active_count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Resolve once no session remains.
    pub async fn wait_idle(&self) {
        while self.active_count() > 0 {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    }
}

/// Guard tied to one session's lifetime.
#[derive(Debug)]
pub struct SessionGuard {
    active: Arc<AtomicU64>,
    id: SessionId,
}

impl SessionGuard {
    /// This session's ID.
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(session = %self.id, "Session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let tracker = SessionTracker::new();
        let a = tracker.track();
        let b = tracker.track();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn count_follows_guards() {
        let tracker = SessionTracker::new();
        assert_eq!(tracker.active_count(), 0);

        let a = tracker.track();
        let b = tracker.track();
        assert_eq!(tracker.active_count(), 2);

        drop(a);
        assert_eq!(tracker.active_count(), 1);

        drop(b);
        assert_eq!(tracker.active_count(), 0);
    }

    #[tokio::test]
    async fn wait_idle_resolves_after_last_guard() {
        let tracker = SessionTracker::new();
        let guard = tracker.track();

        let waiter = {
            let tracker = tracker.clone();
            tokio::spawn(async move { tracker.wait_idle().await })
        };

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("wait_idle should resolve")
            .expect("task should not panic");
    }
}
