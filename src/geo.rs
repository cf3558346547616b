//! Great-circle distance between track points.

use crate::model::TrackPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Inputs are degrees, converted to radians internally. Coincident
/// points yield exactly 0. Coordinate range checking happens at
/// ingestion, not here. Exact poles are degenerate: the result is
/// finite but not meaningful.
pub fn distance_km(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
