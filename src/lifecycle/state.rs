//! Service lifecycle state machine.
//!
//! # State Transitions
//! ```text
//! NotStarted → StartPending: start entry point invoked
//! StartPending → Running:    worker thread created, controls accepted
//! StartPending → Stopped:    start failed before the worker existed
//! Running → StopPending:     stop control received
//! StopPending → Stopped:     worker thread joined
//! ```
//!
//! # Design Decisions
//! - Every intermediate state is reported to the host; none may be skipped
//! - Transitions from a terminal state are rejected silently
//! - The state itself carries no data; the controller owns the surrounding
//!   resources (worker handle, stop signal, log sink)

/// Lifecycle state as observed by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Start entry point has not been invoked yet.
    NotStarted,
    /// Start is in progress; a stop control is not yet meaningful.
    StartPending,
    /// Worker thread is alive and the reactor is running.
    Running,
    /// Stop control received; waiting for the worker thread to exit.
    StopPending,
    /// Worker thread joined (or start failed). Terminal.
    Stopped,
}

impl ServiceState {
    /// Whether a transition to `next` is one of the legal edges.
    pub fn can_transition_to(self, next: ServiceState) -> bool {
        matches!(
            (self, next),
            (ServiceState::NotStarted, ServiceState::StartPending)
                | (ServiceState::StartPending, ServiceState::Running)
                | (ServiceState::StartPending, ServiceState::Stopped)
                | (ServiceState::Running, ServiceState::StopPending)
                | (ServiceState::StopPending, ServiceState::Stopped)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ServiceState::Stopped)
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ServiceState::NotStarted => "NotStarted",
            ServiceState::StartPending => "StartPending",
            ServiceState::Running => "Running",
            ServiceState::StopPending => "StopPending",
            ServiceState::Stopped => "Stopped",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_edges() {
        assert!(ServiceState::NotStarted.can_transition_to(ServiceState::StartPending));
        assert!(ServiceState::StartPending.can_transition_to(ServiceState::Running));
        assert!(ServiceState::StartPending.can_transition_to(ServiceState::Stopped));
        assert!(ServiceState::Running.can_transition_to(ServiceState::StopPending));
        assert!(ServiceState::StopPending.can_transition_to(ServiceState::Stopped));
    }

    #[test]
    fn illegal_edges() {
        // No state may be skipped on the way up or down.
        assert!(!ServiceState::NotStarted.can_transition_to(ServiceState::Running));
        assert!(!ServiceState::NotStarted.can_transition_to(ServiceState::Stopped));
        assert!(!ServiceState::Running.can_transition_to(ServiceState::Stopped));
        // One-way: nothing leaves Stopped, nothing re-enters Running.
        assert!(!ServiceState::Stopped.can_transition_to(ServiceState::StartPending));
        assert!(!ServiceState::StopPending.can_transition_to(ServiceState::Running));
    }

    #[test]
    fn terminal_state() {
        assert!(ServiceState::Stopped.is_terminal());
        assert!(!ServiceState::StopPending.is_terminal());
        assert!(!ServiceState::NotStarted.is_terminal());
    }
}
