//! Bounded, newest-first log of completed walks.
//!
//! The full sequence is persisted as one JSON array under a fixed key
//! after every append. Loading is fail-soft: corrupt or missing data
//! degrades to an empty history instead of an error, so a bad persist
//! can never take session tracking down with it.

use jiff::{SignedDuration, Timestamp, civil::Date};
use tracing::warn;

use crate::model::WalkRecord;
use crate::storage::{KeyValueStore, Result};

/// Storage key the serialized history lives under.
const HISTORY_KEY: &str = "walk-history";

/// Maximum number of records retained; the oldest beyond this are
/// discarded on append.
const CAPACITY: usize = 100;

/// Date filter for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Yesterday,
    AllTime,
}

/// Totals over the trailing seven days.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub walks: usize,
    pub distance_km: f64,
    pub steps: u64,
    pub avg_distance_km: f64,
}

/// Walk history backed by an injected key-value store.
pub struct History<S> {
    records: Vec<WalkRecord>,
    store: S,
}

impl<S: KeyValueStore> History<S> {
    /// Load history from the store.
    ///
    /// Absent data is an empty history. Unparseable data is discarded
    /// with a logged warning and treated as empty.
    pub fn open(store: S) -> Result<Self> {
        let records = match store.get(HISTORY_KEY)? {
            None => Vec::new(),
            Some(json) => match serde_json::from_str(&json) {
                Ok(records) => records,
                Err(e) => {
                    warn!("discarding corrupt walk history: {e}");
                    Vec::new()
                }
            },
        };
        Ok(Self { records, store })
    }

    /// Insert a record at the front, enforce capacity, and persist the
    /// full sequence.
    pub fn append(&mut self, record: WalkRecord) -> Result<()> {
        self.records.insert(0, record);
        self.records.truncate(CAPACITY);
        let json = serde_json::to_string(&self.records)?;
        self.store.set(HISTORY_KEY, &json)
    }

    /// All records, newest first.
    pub fn records(&self) -> &[WalkRecord] {
        &self.records
    }

    /// Records in a date bucket, relative to the caller's reference date.
    ///
    /// Today and Yesterday match the record's calendar date exactly.
    /// This is a calendar-day comparison, not a rolling 24-hour window.
    pub fn query(&self, bucket: DateBucket, on: Date) -> Vec<&WalkRecord> {
        match bucket {
            DateBucket::AllTime => self.records.iter().collect(),
            DateBucket::Today => self.records.iter().filter(|r| r.date == on).collect(),
            DateBucket::Yesterday => match on.yesterday() {
                Ok(yesterday) => self.records.iter().filter(|r| r.date == yesterday).collect(),
                Err(_) => Vec::new(),
            },
        }
    }

    /// Totals for walks started within seven days before `reference`.
    ///
    /// The average is guarded against an empty week: zero walks yield
    /// zero average, not a division by zero.
    pub fn weekly_summary(&self, reference: Timestamp) -> WeeklySummary {
        let cutoff = reference
            .checked_sub(SignedDuration::from_hours(7 * 24))
            .unwrap_or(Timestamp::MIN);

        let mut summary = WeeklySummary {
            walks: 0,
            distance_km: 0.0,
            steps: 0,
            avg_distance_km: 0.0,
        };
        for record in self.records.iter().filter(|r| r.started_at >= cutoff) {
            summary.walks += 1;
            summary.distance_km += record.distance_km;
            summary.steps += record.steps;
        }
        summary.avg_distance_km = summary.distance_km / summary.walks.max(1) as f64;
        summary
    }
}
