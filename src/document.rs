//! The composed map document.
//!
//! A [`MapDocument`] is a plain value: base layers, overlays and controls in
//! the order they were attached. Rendering it is deterministic, so identical
//! documents always produce byte-identical HTML.

use log::debug;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::html;
use crate::layers::{Overlay, TileLayer};
use crate::style::ControlPosition;
use crate::GpsPoint;

/// Geolocation button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocateControl {
    pub position: ControlPosition,
}

/// Layer selection control listing base layers and overlays together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerControl {
    pub position: ControlPosition,
    pub collapsed: bool,
}

/// An interactive map: selectable base layers plus independent overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub title: String,
    pub center: GpsPoint,
    pub zoom_start: u8,
    pub base_layers: Vec<TileLayer>,
    pub overlays: Vec<Overlay>,
    pub locate_control: Option<LocateControl>,
    pub layer_control: Option<LayerControl>,
    /// Length of the rendered track, informational
    pub track_length_km: f64,
}

impl MapDocument {
    /// An empty map centered on `center`, with no background layer.
    pub fn new(title: &str, center: GpsPoint, zoom_start: u8) -> Self {
        Self {
            title: title.to_string(),
            center,
            zoom_start,
            base_layers: Vec::new(),
            overlays: Vec::new(),
            locate_control: None,
            layer_control: None,
            track_length_km: 0.0,
        }
    }

    pub fn add_base_layer(&mut self, layer: TileLayer) -> &mut Self {
        self.base_layers.push(layer);
        self
    }

    pub fn add_overlay(&mut self, overlay: Overlay) -> &mut Self {
        self.overlays.push(overlay);
        self
    }

    pub fn add_locate_control(&mut self, position: ControlPosition) -> &mut Self {
        self.locate_control = Some(LocateControl { position });
        self
    }

    pub fn add_layer_control(&mut self, position: ControlPosition, collapsed: bool) -> &mut Self {
        self.layer_control = Some(LayerControl { position, collapsed });
        self
    }

    pub fn overlay(&self, name: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.name == name)
    }

    /// Total number of markers across all overlays.
    pub fn marker_count(&self) -> usize {
        self.overlays.iter().map(|o| o.markers().count()).sum()
    }

    /// Render the self-contained HTML page.
    pub fn render_html(&self) -> Result<String> {
        html::render(self)
    }

    /// Render and write the document to `path`.
    ///
    /// The page is rendered first, then written to a temporary file next to
    /// `path` and renamed into place, so a failed call never leaves a
    /// truncated document behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let page = self.render_html()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(page.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;

        debug!("wrote {} bytes to {}", page.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Feature;

    fn sample() -> MapDocument {
        let mut document = MapDocument::new("ride", GpsPoint::new(45.0, 5.0), 10);
        document
            .add_base_layer(TileLayer {
                name: "OpenStreetMap".to_string(),
                url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "&copy; OpenStreetMap contributors".to_string(),
            })
            .add_overlay(Overlay {
                name: "Track".to_string(),
                show: true,
                features: vec![Feature::Polyline {
                    coordinates: vec![[45.0, 5.0], [45.1, 5.1]],
                    color: "blue".to_string(),
                    weight: 3.0,
                    opacity: 0.8,
                }],
            })
            .add_locate_control(ControlPosition::TopLeft)
            .add_layer_control(ControlPosition::TopRight, false);
        document
    }

    #[test]
    fn test_new_document_has_no_layers() {
        let document = MapDocument::new("ride", GpsPoint::new(45.0, 5.0), 12);
        assert!(document.base_layers.is_empty());
        assert!(document.overlays.is_empty());
        assert!(document.layer_control.is_none());
        assert_eq!(document.zoom_start, 12);
    }

    #[test]
    fn test_controls_serialize_as_leaflet_positions() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"locate_control\":{\"position\":\"topleft\"}"));
        assert!(json.contains("\"layer_control\":{\"position\":\"topright\",\"collapsed\":false}"));
    }

    #[test]
    fn test_overlay_lookup_and_marker_count() {
        let document = sample();
        assert!(document.overlay("Track").is_some());
        assert!(document.overlay("Points of Interest").is_none());
        assert_eq!(document.marker_count(), 0);
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(sample().render_html().unwrap(), sample().render_html().unwrap());
    }

    #[test]
    fn test_save_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ride.html");
        let document = sample();

        document.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document.render_html().unwrap());
        // Only the document itself remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ride.html");
        assert!(sample().save(&path).is_err());
        assert!(!path.exists());
    }
}
