//! Layer builders.
//!
//! Base layers are plain values built from the style. The two overlays
//! (track and POIs) are accumulated through their own builder and handed to
//! the document once finished, so no layer state is shared between them.

use log::{debug, warn};
use serde::Serialize;

use crate::poi::PoiRecord;
use crate::rank::FilterRankTable;
use crate::style::TileLayerConfig;
use crate::GpsPoint;

pub const TRACK_OVERLAY_NAME: &str = "Track";
pub const POI_OVERLAY_NAME: &str = "Points of Interest";

/// A selectable base layer. Exactly one is visible at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub url: String,
    pub attribution: String,
}

impl From<&TileLayerConfig> for TileLayer {
    fn from(config: &TileLayerConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            attribution: config.attribution.clone(),
        }
    }
}

/// A drawable item inside an overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feature {
    Polyline {
        /// `[lat, lon]` pairs in track order
        coordinates: Vec<[f64; 2]>,
        color: String,
        weight: f64,
        opacity: f64,
    },
    Marker {
        latitude: f64,
        longitude: f64,
        color: String,
        icon: String,
        popup_html: String,
        popup_max_width: u32,
    },
}

/// A togglable group of features, independent of the base layer and of
/// every other overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub name: String,
    pub show: bool,
    pub features: Vec<Feature>,
}

impl Overlay {
    /// Markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = &Feature> {
        self.features
            .iter()
            .filter(|f| matches!(f, Feature::Marker { .. }))
    }
}

/// Builds the track overlay.
#[derive(Debug)]
pub struct TrackLayerBuilder {
    name: String,
    color: String,
    weight: f64,
    opacity: f64,
    features: Vec<Feature>,
}

impl TrackLayerBuilder {
    pub fn new(color: &str, weight: f64, opacity: f64) -> Self {
        Self {
            name: TRACK_OVERLAY_NAME.to_string(),
            color: color.to_string(),
            weight,
            opacity,
            features: Vec::new(),
        }
    }

    /// Add a connected line through all points.
    pub fn add_track(&mut self, points: &[GpsPoint]) -> &mut Self {
        let coordinates = points.iter().map(|p| [p.latitude, p.longitude]).collect();
        self.features.push(Feature::Polyline {
            coordinates,
            color: self.color.clone(),
            weight: self.weight,
            opacity: self.opacity,
        });
        self
    }

    pub fn finish(self) -> Overlay {
        Overlay {
            name: self.name,
            show: true,
            features: self.features,
        }
    }
}

/// Builds the POI overlay, coloring each marker through the rank table.
#[derive(Debug)]
pub struct PoiLayerBuilder<'a> {
    name: String,
    ranks: &'a FilterRankTable,
    icon: String,
    popup_max_width: u32,
    features: Vec<Feature>,
    skipped: usize,
}

impl<'a> PoiLayerBuilder<'a> {
    pub fn new(ranks: &'a FilterRankTable, icon: &str, popup_max_width: u32) -> Self {
        Self {
            name: POI_OVERLAY_NAME.to_string(),
            ranks,
            icon: icon.to_string(),
            popup_max_width,
            features: Vec::new(),
            skipped: 0,
        }
    }

    /// Append a marker for `poi`. Markers keep insertion order and are never
    /// deduplicated. A POI without a valid WGS84 location cannot be placed
    /// and is skipped.
    pub fn add(&mut self, poi: &PoiRecord) -> &mut Self {
        if !poi.location().is_valid() {
            warn!(
                "skipping POI '{}' with invalid location ({}, {})",
                poi.name, poi.latitude, poi.longitude
            );
            self.skipped += 1;
            return self;
        }

        let color = self.ranks.color_for(poi.filter());
        debug!("POI '{}' filter {:?} -> {}", poi.name, poi.filter(), color);

        self.features.push(Feature::Marker {
            latitude: poi.latitude,
            longitude: poi.longitude,
            color: color.to_string(),
            icon: self.icon.clone(),
            popup_html: poi.popup_html(),
            popup_max_width: self.popup_max_width,
        });
        self
    }

    /// Number of POIs rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Overlay {
        Overlay {
            name: self.name,
            show: true,
            features: self.features,
        }
    }
}
