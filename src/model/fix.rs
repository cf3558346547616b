//! Position fixes: raw provider reports and validated track points.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A raw position fix as reported by a location source, unvalidated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported horizontal accuracy in meters.
    pub accuracy: f64,
    pub timestamp: Timestamp,
}

/// A validated point on a walk's route. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPoint {
    /// Degrees in [-90, 90].
    pub latitude: f64,
    /// Degrees in [-180, 180].
    pub longitude: f64,
    /// Reported horizontal accuracy in meters. Carried through, never
    /// used to filter points.
    pub accuracy: f64,
    pub timestamp: Timestamp,
}

/// Why a raw fix was rejected at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

impl RawFix {
    /// Validate coordinate ranges and promote to a track point.
    ///
    /// Consecutive duplicates pass through unchanged; they contribute
    /// zero distance downstream. Accuracy is not checked: low-accuracy
    /// fixes count like any other.
    pub fn ingest(self) -> Result<TrackPoint, IngestError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(IngestError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(IngestError::Longitude(self.longitude));
        }
        Ok(TrackPoint {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            timestamp: self.timestamp,
        })
    }
}
