//! Style configuration for the map document.
//!
//! Every option has an explicit default, so a partial JSON object (or none
//! at all) is always a usable configuration. The configuration is resolved
//! once at the start of composition and never re-queried afterwards.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Marker colors the awesome-markers plugin ships icons for.
pub const MARKER_COLORS: &[&str] = &[
    "red", "darkred", "lightred", "orange", "beige", "green", "darkgreen",
    "lightgreen", "blue", "darkblue", "lightblue", "cadetblue", "purple",
    "darkpurple", "pink", "white", "gray", "lightgray", "black",
];

/// Corner of the map a Leaflet control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    #[serde(alias = "top-left")]
    TopLeft,
    #[serde(alias = "top-right")]
    TopRight,
    #[serde(alias = "bottom-left")]
    BottomLeft,
    #[serde(alias = "bottom-right")]
    BottomRight,
}

impl ControlPosition {
    /// Leaflet's name for this position.
    pub fn as_leaflet(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// A selectable base layer: tile URL template plus the attribution the
/// provider requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    #[serde(default = "default_tile_layer_name")]
    pub name: String,
    /// URL template, e.g. `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`
    #[serde(alias = "tiles")]
    pub url: String,
    #[serde(alias = "attr")]
    pub attribution: String,
}

fn default_tile_layer_name() -> String {
    "Base".to_string()
}

impl TileLayerConfig {
    pub fn new(name: &str, url: &str, attribution: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            attribution: attribution.to_string(),
        }
    }
}

/// The three built-in OSM-family base layers.
pub fn default_tile_layers() -> Vec<TileLayerConfig> {
    vec![
        TileLayerConfig::new(
            "OpenStreetMap",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; OpenStreetMap contributors",
        ),
        TileLayerConfig::new(
            "OpenTopoMap",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "&copy; OpenStreetMap contributors, SRTM | Map style: &copy; OpenTopoMap",
        ),
        TileLayerConfig::new(
            "CyclOSM",
            "https://{s}.tile-cyclosm.openstreetmap.fr/cyclosm/{z}/{x}/{y}.png",
            "&copy; OpenStreetMap contributors | CyclOSM",
        ),
    ]
}

/// Style options for the composed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Selectable base layers; empty means the three built-in layers.
    pub tile_layers: Vec<TileLayerConfig>,

    /// Initial zoom level. Default: 10
    pub zoom_start: u8,

    /// Line color of the track overlay. Default: "blue"
    pub track_color: String,

    /// Line weight of the track in pixels. Default: 3.0
    pub track_weight: f64,

    /// Line opacity of the track. Default: 0.8
    pub track_opacity: f64,

    /// Cyclic palette for ranked filters.
    /// Default: red, orange, purple, green, blue
    pub marker_color_palette: Vec<String>,

    /// Color of unranked or unmatched POIs. Default: "gray"
    pub default_marker_color: String,

    /// Glyphicon name drawn inside each marker. Default: "info-sign"
    pub marker_icon: String,

    /// Maximum popup width in pixels. Default: 300
    pub popup_max_width: u32,

    /// Default: top-right
    pub layer_control_position: ControlPosition,

    /// Default: false (expanded)
    pub layer_control_collapsed: bool,

    /// Default: top-left
    pub locate_control_position: ControlPosition,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tile_layers: default_tile_layers(),
            zoom_start: 10,
            track_color: "blue".to_string(),
            track_weight: 3.0,
            track_opacity: 0.8,
            marker_color_palette: ["red", "orange", "purple", "green", "blue"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            default_marker_color: "gray".to_string(),
            marker_icon: "info-sign".to_string(),
            popup_max_width: 300,
            layer_control_position: ControlPosition::TopRight,
            layer_control_collapsed: false,
            locate_control_position: ControlPosition::TopLeft,
        }
    }
}

impl StyleConfig {
    /// Parse a (possibly partial) JSON style object.
    ///
    /// ```
    /// use alonggpx_map::{ControlPosition, StyleConfig};
    ///
    /// let style = StyleConfig::from_json_str(r#"{"zoom_start": 13, "layer_control_position": "bottomleft"}"#).unwrap();
    /// assert_eq!(style.zoom_start, 13);
    /// assert_eq!(style.layer_control_position, ControlPosition::BottomLeft);
    /// assert_eq!(style.default_marker_color, "gray");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON style file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Merge against the defaults once, before composition starts.
    ///
    /// An empty tile layer list is replaced by the built-in layers. Colors the
    /// marker plugin does not know are kept but reported.
    pub fn resolved(&self) -> StyleConfig {
        let mut style = self.clone();

        if style.tile_layers.is_empty() {
            style.tile_layers = default_tile_layers();
        }

        for layer in &style.tile_layers {
            if layer.attribution.trim().is_empty() {
                warn!("tile layer '{}' has no attribution text", layer.name);
            }
        }

        for color in style
            .marker_color_palette
            .iter()
            .chain(std::iter::once(&style.default_marker_color))
        {
            if !MARKER_COLORS.contains(&color.as_str()) {
                warn!("marker color '{}' is not supported by the marker icons", color);
            }
        }

        style
    }
}
