//! Request state machine.
//!
//! Tracks the single in-flight plan request and rejects a new submission
//! while one is outstanding.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Lifecycle of a plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl FromStr for RequestState {
    type Err = RequestStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "in_flight" => Ok(Self::InFlight),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            other => Err(RequestStateError::UnknownState(other.to_owned())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestStateError {
    #[error("a request is already in flight")]
    AlreadyInFlight,

    #[error("invalid request state transition: {from} -> {to}")]
    InvalidTransition { from: RequestState, to: RequestState },

    #[error("invalid request state: {0:?}")]
    UnknownState(String),
}

/// Enforces the request transition graph:
///
/// ```text
/// idle      -> in_flight
/// succeeded -> in_flight
/// failed    -> in_flight
/// in_flight -> succeeded
/// in_flight -> failed
/// ```
#[derive(Debug, Default)]
pub struct RequestTracker {
    state: RequestState,
    last_error: Option<String>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `from -> to` is an edge in the state graph.
    pub fn is_valid_transition(from: RequestState, to: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (from, to),
            (Idle | Succeeded | Failed, InFlight) | (InFlight, Succeeded | Failed)
        )
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == RequestState::InFlight
    }

    /// Message from the most recent failure. Cleared when a new request begins.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a request. Fails if one is already in flight.
    pub fn begin(&mut self) -> Result<(), RequestStateError> {
        if self.is_in_flight() {
            return Err(RequestStateError::AlreadyInFlight);
        }
        self.transition(RequestState::InFlight)?;
        self.last_error = None;
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<(), RequestStateError> {
        self.transition(RequestState::Succeeded)
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), RequestStateError> {
        self.transition(RequestState::Failed)?;
        self.last_error = Some(message.into());
        Ok(())
    }

    fn transition(&mut self, to: RequestState) -> Result<(), RequestStateError> {
        if !Self::is_valid_transition(self.state, to) {
            return Err(RequestStateError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::RequestState::*;

    #[test]
    fn starts_idle() {
        let tracker = RequestTracker::new();
        assert_eq!(tracker.state(), Idle);
        assert!(tracker.last_error().is_none());
    }

    #[test]
    fn valid_edges() {
        assert!(RequestTracker::is_valid_transition(Idle, InFlight));
        assert!(RequestTracker::is_valid_transition(Succeeded, InFlight));
        assert!(RequestTracker::is_valid_transition(Failed, InFlight));
        assert!(RequestTracker::is_valid_transition(InFlight, Succeeded));
        assert!(RequestTracker::is_valid_transition(InFlight, Failed));
    }

    #[test]
    fn invalid_edges() {
        assert!(!RequestTracker::is_valid_transition(InFlight, InFlight));
        assert!(!RequestTracker::is_valid_transition(Idle, Succeeded));
        assert!(!RequestTracker::is_valid_transition(Idle, Failed));
        assert!(!RequestTracker::is_valid_transition(Succeeded, Failed));
        assert!(!RequestTracker::is_valid_transition(Failed, Idle));
    }

    #[test]
    fn second_begin_is_rejected_while_in_flight() {
        let mut tracker = RequestTracker::new();
        tracker.begin().unwrap();
        assert_eq!(tracker.begin(), Err(RequestStateError::AlreadyInFlight));
        assert_eq!(tracker.state(), InFlight);
    }

    #[test]
    fn failure_records_message_until_next_begin() {
        let mut tracker = RequestTracker::new();
        tracker.begin().unwrap();
        tracker.fail("boom").unwrap();
        assert_eq!(tracker.state(), Failed);
        assert_eq!(tracker.last_error(), Some("boom"));

        tracker.begin().unwrap();
        assert!(tracker.last_error().is_none());
        tracker.succeed().unwrap();
        assert_eq!(tracker.state(), Succeeded);
    }

    #[test]
    fn finishing_without_begin_is_invalid() {
        let mut tracker = RequestTracker::new();
        assert_eq!(
            tracker.succeed(),
            Err(RequestStateError::InvalidTransition {
                from: Idle,
                to: Succeeded
            })
        );
    }

    #[test]
    fn state_display_roundtrips() {
        for s in [Idle, InFlight, Succeeded, Failed] {
            assert_eq!(s.to_string().parse::<RequestState>().unwrap(), s);
        }
        assert!("done".parse::<RequestState>().is_err());
    }
}
