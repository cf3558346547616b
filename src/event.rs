//! Observable tracker events for rendering and notification collaborators.

use jiff::Timestamp;

use crate::model::WalkRecord;

/// Events emitted by the session tracker.
///
/// Subscribers are notification-only: the tracker does not depend on
/// their existence or success, and they cannot reach back into the
/// session mid-dispatch.
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// A new session began.
    SessionStarted { started_at: Timestamp },

    /// A point was recorded; carries the cumulative totals.
    PositionUpdated {
        distance_km: f64,
        steps: u64,
        elapsed_seconds: f64,
    },

    /// The session ended and its record was finalized.
    SessionCompleted { record: WalkRecord },
}

/// A subscription callback. Boxed so printers, notifiers, and test
/// collectors can all attach the same way.
pub type Subscriber = Box<dyn FnMut(&TrackerEvent)>;
