//! Press-and-hold gesture tracking for marker deletion.
//!
//! T006: Implement press-and-hold tracker as an explicit state machine
//!
//! Touch surfaces have no right-click; a sustained single-finger press on a
//! marker is the delete request instead. The tracker is a two-state machine
//! (idle, pressing with an armed deadline) driven entirely by injected
//! instants, so the shell decides when time passes and tests never sleep.

use std::time::{Duration, Instant};

use crate::map::surface::MarkerBinding;

/// Default hold duration before a press counts as a delete request.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct PendingPress {
    binding: MarkerBinding,
    deadline: Instant,
}

/// Tracks the single in-flight press.
///
/// At most one press is pending at a time: arming a new press replaces the
/// previous one, and a multi-finger press arms nothing while cancelling
/// whatever was pending.
#[derive(Debug)]
pub struct PressTracker {
    hold: Duration,
    pending: Option<PendingPress>,
}

impl PressTracker {
    /// Create a tracker that fires after `hold`.
    pub fn new(hold: Duration) -> Self {
        Self { hold, pending: None }
    }

    /// A press began on the marker behind `binding` with `touches` fingers.
    pub fn press_started(&mut self, binding: MarkerBinding, touches: u8, now: Instant) {
        if touches > 1 {
            if self.pending.take().is_some() {
                tracing::debug!("pending press cancelled by multi-touch");
            }
            return;
        }
        if self.pending.is_some() {
            tracing::debug!("pending press replaced by a new press");
        }
        self.pending = Some(PendingPress { binding, deadline: now + self.hold });
    }

    /// The press lifted or was cancelled before firing.
    pub fn press_ended(&mut self) {
        self.pending = None;
    }

    /// Fire the pending press if its deadline has passed. Fires at most
    /// once per press.
    pub fn poll(&mut self, now: Instant) -> Option<MarkerBinding> {
        if self.pending.as_ref().is_some_and(|press| now >= press.deadline) {
            return self.pending.take().map(|press| press.binding);
        }
        None
    }

    /// Whether a press is currently armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}
