//! The persisted form of a completed walk.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TrackPoint;

/// A completed walk as it lives in history.
///
/// History serializes as one JSON array of these records, newest first:
/// ISO-8601 timestamps, floats for distance and duration, integer steps,
/// and the full route as a nested array of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkRecord {
    pub id: Uuid,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    /// Wall-clock duration in seconds.
    pub duration_seconds: f64,
    pub distance_km: f64,
    pub steps: u64,
    pub route: Vec<TrackPoint>,
    /// Calendar day of `started_at` in the local time zone. Drives the
    /// Today/Yesterday history buckets.
    pub date: Date,
}

/// Calendar day of a timestamp in the system time zone.
pub fn local_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::system()).date()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_json() {
        let record = WalkRecord {
            id: Uuid::new_v4(),
            started_at: Timestamp::new(1_700_000_000, 0).unwrap(),
            ended_at: Timestamp::new(1_700_000_600, 0).unwrap(),
            duration_seconds: 600.0,
            distance_km: 2.22,
            steps: 2775,
            route: vec![TrackPoint {
                latitude: 0.0,
                longitude: 0.01,
                accuracy: 5.0,
                timestamp: Timestamp::new(1_700_000_000, 0).unwrap(),
            }],
            date: jiff::civil::date(2023, 11, 14),
        };

        let json = serde_json::to_string(&record).unwrap();
        let loaded: WalkRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.steps, 2775);
        assert_eq!(loaded.route.len(), 1);
        assert_eq!(loaded.date, record.date);
    }

    #[test]
    fn serialized_timestamps_are_iso_8601() {
        let record = WalkRecord {
            id: Uuid::new_v4(),
            started_at: Timestamp::new(1_700_000_000, 0).unwrap(),
            ended_at: Timestamp::new(1_700_000_600, 0).unwrap(),
            duration_seconds: 600.0,
            distance_km: 0.0,
            steps: 0,
            route: vec![],
            date: jiff::civil::date(2023, 11, 14),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""startedAt":"2023-11-14T22:13:20Z""#));
        assert!(json.contains(r#""date":"2023-11-14""#));
    }

    #[test]
    fn local_date_matches_system_zone() {
        let at = Timestamp::new(1_700_000_000, 0).unwrap();
        let expected = at.to_zoned(TimeZone::system()).date();
        assert_eq!(local_date(at), expected);
    }
}
