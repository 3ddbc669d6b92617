//! Geographic coordinates for stops.
//!
//! Distances use a local planar approximation: one degree of latitude is a
//! fixed number of metres, and a degree of longitude is scaled by a fixed
//! ratio valid near the network's latitude. This is not a full geodesic
//! calculation and is only accurate across a single metropolitan area.

use serde::{Deserialize, Serialize};

/// Metres per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_200.0;

/// Length of a degree of longitude relative to a degree of latitude,
/// at the network's latitude.
const LON_RATIO: f64 = 0.73;

/// A point on the map: longitude and latitude in decimal degrees.
///
/// # Examples
///
/// ```
/// use transit_graph::geo::GisPoint;
///
/// let a = GisPoint::new(174.776, -41.286);
/// let b = GisPoint::new(174.776, -41.286);
/// assert_eq!(a.distance(&b), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GisPoint {
    lon: f64,
    lat: f64,
}

impl GisPoint {
    /// Create a point from longitude and latitude in degrees.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Straight-line distance to another point, in metres.
    pub fn distance(&self, other: &GisPoint) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = (self.lon - other.lon) * LON_RATIO;
        METERS_PER_DEGREE * d_lat.hypot(d_lon)
    }

    /// Translate the point by the given deltas, in degrees.
    ///
    /// Used by map panning in display code; the analysis algorithms never
    /// move a point.
    pub fn move_by(&mut self, d_lon: f64, d_lat: f64) {
        self.lon += d_lon;
        self.lat += d_lat;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = f64> {
        -180.0..180.0f64
    }

    proptest! {
        /// Distance is symmetric.
        #[test]
        fn symmetric(lon1 in coord(), lat1 in coord(), lon2 in coord(), lat2 in coord()) {
            let a = GisPoint::new(lon1, lat1);
            let b = GisPoint::new(lon2, lat2);
            prop_assert_eq!(a.distance(&b), b.distance(&a));
        }

        /// Distance is never negative.
        #[test]
        fn non_negative(lon1 in coord(), lat1 in coord(), lon2 in coord(), lat2 in coord()) {
            let a = GisPoint::new(lon1, lat1);
            let b = GisPoint::new(lon2, lat2);
            prop_assert!(a.distance(&b) >= 0.0);
        }
    }
}
