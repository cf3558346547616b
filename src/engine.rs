//! The session manager: tracker, history, and location source wiring.
//!
//! Owns the failure semantics. Invalid fixes are dropped, provider
//! errors leave the session active with recovery automatic once fixes
//! resume, and a persistence failure degrades to a logged warning; no
//! failure is fatal to session tracking.

use jiff::Timestamp;
use tracing::{debug, warn};

use crate::event::TrackerEvent;
use crate::history::History;
use crate::model::{RawFix, WalkRecord};
use crate::provider::{FixError, LocationSource};
use crate::session::Tracker;
use crate::storage::KeyValueStore;

/// Coordinates one tracker with one history store.
pub struct WalkEngine<S> {
    tracker: Tracker,
    history: History<S>,
}

impl<S: KeyValueStore> WalkEngine<S> {
    pub fn new(history: History<S>) -> Self {
        Self {
            tracker: Tracker::new(),
            history,
        }
    }

    /// Attach an event subscriber (UI, notifier, test collector).
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TrackerEvent) + 'static) {
        self.tracker.subscribe(subscriber);
    }

    /// Begin a session. No-op when one is already active.
    pub fn start_walk(&mut self, at: Timestamp) {
        self.tracker.start(at);
    }

    /// Validate and record one provider report.
    ///
    /// Rejected coordinates and provider errors are logged and dropped;
    /// the session stays active either way.
    pub fn record_fix(&mut self, fix: Result<RawFix, FixError>) {
        match fix {
            Ok(raw) => match raw.ingest() {
                Ok(point) => self.tracker.record(point),
                Err(e) => debug!("dropping fix: {e}"),
            },
            Err(e) => warn!("location source error: {e}"),
        }
    }

    /// End the active session, archive its record, and return it.
    ///
    /// Returns `None` when idle. A storage failure is logged and the
    /// record is still returned: losing one persist must not lose the
    /// walk summary in front of the user.
    pub fn stop_walk(&mut self, at: Timestamp) -> Option<WalkRecord> {
        let record = self.tracker.stop(at)?;
        if let Err(e) = self.history.append(record.clone()) {
            warn!("failed to persist walk history: {e}");
        }
        Some(record)
    }

    /// Drain a location source into the active session, then cancel it.
    ///
    /// Stops early if the session goes idle. Cancelling an already-done
    /// source is harmless.
    pub fn run(&mut self, source: &mut dyn LocationSource) {
        while self.tracker.is_active() {
            match source.next_fix() {
                Some(fix) => self.record_fix(fix),
                None => break,
            }
        }
        source.cancel();
    }

    pub fn is_walking(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }
}
