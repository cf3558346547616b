//! Core data model: raw fixes, track points, and walk records.

mod fix;
mod record;

pub use fix::{IngestError, RawFix, TrackPoint};
pub use record::{WalkRecord, local_date};
