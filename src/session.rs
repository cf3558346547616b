//! Walk session lifecycle: idle, active, completed-and-archived.
//!
//! The tracker owns at most one walk at a time. Starting while active
//! and stopping while idle are no-ops, never errors; a completed walk
//! is finalized into a [`WalkRecord`] and the tracker returns to idle.

use jiff::Timestamp;
use uuid::Uuid;

use crate::event::{Subscriber, TrackerEvent};
use crate::geo;
use crate::model::{TrackPoint, WalkRecord, local_date};

/// Assumed stride length in kilometers (about 0.8 m per step).
///
/// Step counts are always recomputed from distance with this constant,
/// never mutated independently. A coarse approximation: not adaptive
/// to pace or height.
pub const STRIDE_KM: f64 = 0.0008;

/// Where the tracker stands.
#[derive(Debug)]
enum Phase {
    Idle,
    Active(ActiveWalk),
}

/// Mutable state of a walk in progress. Lives only inside
/// [`Phase::Active`], so an idle tracker cannot carry stale route data.
#[derive(Debug)]
struct ActiveWalk {
    id: Uuid,
    started_at: Timestamp,
    route: Vec<TrackPoint>,
    distance_km: f64,
    steps: u64,
}

/// The session state machine: owns the active walk and emits events.
pub struct Tracker {
    phase: Phase,
    subscribers: Vec<Subscriber>,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            subscribers: Vec::new(),
        }
    }

    /// Attach an event subscriber.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TrackerEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    /// Cumulative distance of the active walk; 0 when idle.
    pub fn distance_km(&self) -> f64 {
        match &self.phase {
            Phase::Active(walk) => walk.distance_km,
            Phase::Idle => 0.0,
        }
    }

    /// Step estimate of the active walk; 0 when idle.
    pub fn steps(&self) -> u64 {
        match &self.phase {
            Phase::Active(walk) => walk.steps,
            Phase::Idle => 0,
        }
    }

    /// Start time of the active walk, if any.
    pub fn started_at(&self) -> Option<Timestamp> {
        match &self.phase {
            Phase::Active(walk) => Some(walk.started_at),
            Phase::Idle => None,
        }
    }

    /// Number of points recorded on the active walk; 0 when idle.
    pub fn route_len(&self) -> usize {
        match &self.phase {
            Phase::Active(walk) => walk.route.len(),
            Phase::Idle => 0,
        }
    }

    /// Begin a new walk at `at` with an empty route and zero totals.
    ///
    /// No-op when a walk is already active: the walk in flight keeps
    /// its route, distance, and start time.
    pub fn start(&mut self, at: Timestamp) {
        if self.is_active() {
            return;
        }
        self.phase = Phase::Active(ActiveWalk {
            id: Uuid::new_v4(),
            started_at: at,
            route: Vec::new(),
            distance_km: 0.0,
            steps: 0,
        });
        self.emit(&TrackerEvent::SessionStarted { started_at: at });
    }

    /// Append a point to the active walk's route and update totals.
    ///
    /// The segment from the previous point is added to the cumulative
    /// distance and the step estimate is recomputed. Ignored when idle.
    pub fn record(&mut self, point: TrackPoint) {
        let Phase::Active(walk) = &mut self.phase else {
            return;
        };
        if let Some(prev) = walk.route.last() {
            walk.distance_km += geo::distance_km(prev, &point);
            walk.steps = (walk.distance_km / STRIDE_KM).floor() as u64;
        }
        let update = TrackerEvent::PositionUpdated {
            distance_km: walk.distance_km,
            steps: walk.steps,
            elapsed_seconds: seconds_between(walk.started_at, point.timestamp),
        };
        walk.route.push(point);
        self.emit(&update);
    }

    /// End the active walk at `at` and return its finalized record.
    ///
    /// The tracker returns to idle. Returns `None` when already idle:
    /// no record is produced and nothing is emitted.
    pub fn stop(&mut self, at: Timestamp) -> Option<WalkRecord> {
        let Phase::Active(walk) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };
        let record = WalkRecord {
            id: walk.id,
            started_at: walk.started_at,
            ended_at: at,
            duration_seconds: seconds_between(walk.started_at, at),
            distance_km: walk.distance_km,
            steps: walk.steps,
            date: local_date(walk.started_at),
            route: walk.route,
        };
        self.emit(&TrackerEvent::SessionCompleted {
            record: record.clone(),
        });
        Some(record)
    }

    fn emit(&mut self, event: &TrackerEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

fn seconds_between(start: Timestamp, end: Timestamp) -> f64 {
    (end.as_millisecond() - start.as_millisecond()) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn ts(offset_secs: i64) -> Timestamp {
        Timestamp::new(1_700_000_000 + offset_secs, 0).unwrap()
    }

    fn point(latitude: f64, longitude: f64, at: Timestamp) -> TrackPoint {
        TrackPoint {
            latitude,
            longitude,
            accuracy: 5.0,
            timestamp: at,
        }
    }

    #[test]
    fn starts_idle() {
        let tracker = Tracker::new();
        assert!(!tracker.is_active());
        assert_eq!(tracker.distance_km(), 0.0);
        assert_eq!(tracker.steps(), 0);
    }

    #[test]
    fn start_activates_with_empty_totals() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));

        assert!(tracker.is_active());
        assert_eq!(tracker.route_len(), 0);
        assert_eq!(tracker.distance_km(), 0.0);
        assert_eq!(tracker.started_at(), Some(ts(0)));
    }

    #[test]
    fn start_while_active_is_a_no_op() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(10)));
        tracker.record(point(0.0, 0.01, ts(20)));

        let distance = tracker.distance_km();
        tracker.start(ts(100));

        assert_eq!(tracker.started_at(), Some(ts(0)));
        assert_eq!(tracker.route_len(), 2);
        assert_eq!(tracker.distance_km(), distance);
    }

    #[test]
    fn record_while_idle_is_ignored() {
        let mut tracker = Tracker::new();
        tracker.record(point(0.0, 0.0, ts(0)));
        assert_eq!(tracker.route_len(), 0);
    }

    #[test]
    fn first_point_adds_no_distance() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(10)));

        assert_eq!(tracker.route_len(), 1);
        assert_eq!(tracker.distance_km(), 0.0);
    }

    #[test]
    fn duplicate_points_contribute_zero_distance() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        tracker.record(point(59.33, 18.06, ts(10)));
        tracker.record(point(59.33, 18.06, ts(20)));

        assert_eq!(tracker.route_len(), 2);
        assert_eq!(tracker.distance_km(), 0.0);
        assert_eq!(tracker.steps(), 0);
    }

    #[test]
    fn steps_track_distance_after_every_point() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        for (i, lon) in [0.0, 0.005, 0.01, 0.02].into_iter().enumerate() {
            tracker.record(point(0.0, lon, ts(i as i64 * 60)));
            let expected = (tracker.distance_km() / STRIDE_KM).floor() as u64;
            assert_eq!(tracker.steps(), expected);
        }
    }

    #[test]
    fn distance_never_decreases() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        let mut last = 0.0;
        for (i, lon) in [0.0, 0.01, 0.01, 0.005].into_iter().enumerate() {
            tracker.record(point(0.0, lon, ts(i as i64 * 60)));
            assert!(tracker.distance_km() >= last);
            last = tracker.distance_km();
        }
    }

    #[test]
    fn stop_while_idle_returns_none() {
        let mut tracker = Tracker::new();
        assert!(tracker.stop(ts(0)).is_none());
    }

    #[test]
    fn full_walk_produces_a_faithful_record() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(0)));
        tracker.record(point(0.0, 0.01, ts(300)));
        tracker.record(point(0.0, 0.02, ts(600)));

        let record = tracker.stop(ts(600)).unwrap();

        assert!((record.distance_km - 2.22).abs() < 0.01, "got {}", record.distance_km);
        assert_eq!(record.duration_seconds, 600.0);
        assert_eq!(record.steps, (record.distance_km / STRIDE_KM).floor() as u64);
        assert_eq!(record.steps, 2779);
        assert_eq!(record.route.len(), 3);
        assert_eq!(record.started_at, ts(0));
        assert_eq!(record.ended_at, ts(600));
        assert_eq!(record.date, local_date(ts(0)));
        assert!(!tracker.is_active());
    }

    #[test]
    fn stop_resets_for_the_next_walk() {
        let mut tracker = Tracker::new();
        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(0)));
        tracker.record(point(0.0, 0.01, ts(60)));
        tracker.stop(ts(60)).unwrap();

        tracker.start(ts(120));
        assert_eq!(tracker.route_len(), 0);
        assert_eq!(tracker.distance_km(), 0.0);
        assert_eq!(tracker.started_at(), Some(ts(120)));
    }

    #[test]
    fn events_fire_in_lifecycle_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tracker = Tracker::new();
        tracker.subscribe(move |event| {
            let label = match event {
                TrackerEvent::SessionStarted { .. } => "started",
                TrackerEvent::PositionUpdated { .. } => "updated",
                TrackerEvent::SessionCompleted { .. } => "completed",
            };
            sink.borrow_mut().push(label);
        });

        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(10)));
        tracker.record(point(0.0, 0.01, ts(20)));
        tracker.stop(ts(30));

        assert_eq!(
            *seen.borrow(),
            vec!["started", "updated", "updated", "completed"]
        );
    }

    #[test]
    fn position_updates_carry_cumulative_totals() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut tracker = Tracker::new();
        tracker.subscribe(move |event| {
            if let TrackerEvent::PositionUpdated {
                distance_km,
                steps,
                elapsed_seconds,
            } = event
            {
                sink.borrow_mut().push((*distance_km, *steps, *elapsed_seconds));
            }
        });

        tracker.start(ts(0));
        tracker.record(point(0.0, 0.0, ts(60)));
        tracker.record(point(0.0, 0.01, ts(120)));

        let updates = seen.borrow();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], (0.0, 0, 60.0));
        assert!((updates[1].0 - 1.1119).abs() < 0.001);
        assert_eq!(updates[1].2, 120.0);
    }
}
