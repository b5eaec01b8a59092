//! # AlongGPX Map
//!
//! Interactive maps of points of interest (POIs) found along a recorded GPS track.
//!
//! This library provides:
//! - A filter rank table that colors each POI by the include filter that matched it
//! - Explicit layer builders for base tiles, the track and the POI overlay
//! - A self-contained HTML map document (Leaflet) written atomically to disk
//!
//! The POI discovery itself (radius queries along the track, deduplication,
//! distance computation) happens upstream; this crate only classifies and
//! renders rows that are already computed.
//!
//! ## Quick Start
//!
//! ```rust
//! use alonggpx_map::{GpsPoint, PoiRecord, StyleConfig, compose};
//!
//! let track = vec![
//!     GpsPoint::from_lon_lat(5.0, 45.0),
//!     GpsPoint::from_lon_lat(5.1, 45.1),
//! ];
//!
//! let cafe = PoiRecord {
//!     name: "Cafe X".to_string(),
//!     distance_from_start_km: 1.2,
//!     distance_from_track_km: 0.05,
//!     matching_filter: Some("amenity=cafe".to_string()),
//!     latitude: 45.05,
//!     longitude: 5.05,
//!     ..Default::default()
//! };
//!
//! let filters = vec!["amenity=cafe".to_string(), "shop=bakery".to_string()];
//! let dir = std::env::temp_dir().join("alonggpx-map-doc");
//!
//! let path = compose(
//!     &[cafe],
//!     &track,
//!     &dir,
//!     "ride",
//!     &StyleConfig::default(),
//!     Some(filters.as_slice()),
//!     Some("20240101_120000"),
//! ).unwrap();
//!
//! assert!(path.ends_with("ride_20240101_120000.html"));
//! ```

pub mod composer;
pub mod document;
pub mod error;
mod html;
pub mod layers;
pub mod poi;
pub mod rank;
pub mod style;

pub use composer::{compose, compose_document, output_file_name};
pub use document::MapDocument;
pub use error::{MapError, Result};
pub use layers::{Feature, Overlay, PoiLayerBuilder, TileLayer, TrackLayerBuilder};
pub use poi::PoiRecord;
pub use rank::FilterRankTable;
pub use style::{ControlPosition, StyleConfig, TileLayerConfig};

use geo::{Distance, Haversine, Point};
use log::warn;
use serde::{Deserialize, Serialize};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use alonggpx_map::GpsPoint;
/// let point = GpsPoint::new(45.1885, 5.7245); // Grenoble
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Create a point from a `(longitude, latitude)` pair, the order GPX
    /// track parsers hand the track over in.
    pub fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl From<GpsPoint> for Point {
    fn from(p: GpsPoint) -> Self {
        Point::new(p.longitude, p.latitude)
    }
}

/// A recorded track: a non-empty, ordered sequence of valid GPS points.
///
/// The first point determines the initial map viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    points: Vec<GpsPoint>,
}

impl Track {
    /// Build a track from raw points.
    ///
    /// Invalid points are dropped with a warning. Fails with
    /// [`MapError::InvalidInput`] when no valid point remains, since no
    /// viewport can be derived from an empty track.
    ///
    /// ```
    /// use alonggpx_map::{GpsPoint, Track};
    ///
    /// assert!(Track::new(&[]).is_err());
    ///
    /// let track = Track::new(&[GpsPoint::new(45.0, 5.0), GpsPoint::new(f64::NAN, 5.0)]).unwrap();
    /// assert_eq!(track.points().len(), 1);
    /// ```
    pub fn new(points: &[GpsPoint]) -> Result<Self> {
        let valid: Vec<GpsPoint> = points.iter().copied().filter(GpsPoint::is_valid).collect();

        if valid.len() < points.len() {
            warn!(
                "dropped {} invalid track point(s) out of {}",
                points.len() - valid.len(),
                points.len()
            );
        }

        if valid.is_empty() {
            return Err(MapError::InvalidInput(
                "track must contain at least one valid coordinate".to_string(),
            ));
        }

        Ok(Self { points: valid })
    }

    /// First point of the track.
    pub fn start(&self) -> GpsPoint {
        self.points[0]
    }

    pub fn points(&self) -> &[GpsPoint] {
        &self.points
    }

    /// Great-circle length of the track in kilometers; 0 for a single point.
    pub fn length_km(&self) -> f64 {
        let meters: f64 = self
            .points
            .windows(2)
            .map(|w| Haversine::distance(Point::from(w[0]), Point::from(w[1])))
            .sum();
        meters / 1000.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gps_point_validation() {
        assert!(GpsPoint::new(45.1885, 5.7245).is_valid());
        assert!(!GpsPoint::new(91.0, 0.0).is_valid());
        assert!(!GpsPoint::new(0.0, 181.0).is_valid());
        assert!(!GpsPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GpsPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_from_lon_lat_swaps_order() {
        let p = GpsPoint::from_lon_lat(5.0, 45.0);
        assert_eq!(p.latitude, 45.0);
        assert_eq!(p.longitude, 5.0);
    }

    #[test]
    fn test_empty_track_is_invalid_input() {
        let err = Track::new(&[]).unwrap_err();
        assert!(matches!(err, MapError::InvalidInput(_)));
    }

    #[test]
    fn test_track_of_only_invalid_points_is_rejected() {
        let err = Track::new(&[GpsPoint::new(100.0, 0.0)]).unwrap_err();
        assert!(matches!(err, MapError::InvalidInput(_)));
    }

    #[test]
    fn test_track_start_skips_invalid_leading_point() {
        let track = Track::new(&[
            GpsPoint::new(f64::NAN, 0.0),
            GpsPoint::new(45.0, 5.0),
            GpsPoint::new(45.1, 5.1),
        ])
        .unwrap();
        assert_eq!(track.start(), GpsPoint::new(45.0, 5.0));
        assert_eq!(track.points().len(), 2);
    }

    #[test]
    fn test_track_length_km() {
        let track = Track::new(&[GpsPoint::new(45.0, 5.0), GpsPoint::new(46.0, 5.0)]).unwrap();
        assert!((track.length_km() - 111.2).abs() < 0.5);
    }

    #[test]
    fn test_single_point_track_has_zero_length() {
        let track = Track::new(&[GpsPoint::new(45.0, 5.0)]).unwrap();
        assert_eq!(track.length_km(), 0.0);
    }

    #[test]
    fn test_track_length_sums_segments() {
        let direct = Track::new(&[GpsPoint::new(45.0, 5.0), GpsPoint::new(45.2, 5.0)]).unwrap();
        let stepped = Track::new(&[
            GpsPoint::new(45.0, 5.0),
            GpsPoint::new(45.1, 5.0),
            GpsPoint::new(45.2, 5.0),
        ])
        .unwrap();
        assert!((direct.length_km() - stepped.length_km()).abs() < 0.001);
    }
}
