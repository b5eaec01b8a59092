//! Map composition: POI table + track + filters + style -> map document.
//!
//! Composition is a single linear pass with no shared state. The document is
//! assembled fully in memory and written once at the end, so a call either
//! produces the whole file or fails before anything is written.

use chrono::Local;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::MapDocument;
use crate::error::{MapError, Result};
use crate::layers::{PoiLayerBuilder, TileLayer, TrackLayerBuilder};
use crate::poi::PoiRecord;
use crate::rank::FilterRankTable;
use crate::style::StyleConfig;
use crate::{GpsPoint, Track};

/// File extension of the map document.
pub const DOCUMENT_EXTENSION: &str = "html";

/// Timestamp layout used when the caller does not supply one.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Assemble the map document in memory.
///
/// POIs are placed in input order, colored through the rank table built
/// from `include_filters` (priority order). Without filters every POI uses
/// the default marker color.
///
/// Fails with [`MapError::InvalidInput`] if the track has no valid point.
pub fn compose_document(
    pois: &[PoiRecord],
    track: &[GpsPoint],
    project_name: &str,
    style: &StyleConfig,
    include_filters: Option<&[String]>,
) -> Result<MapDocument> {
    let style = style.resolved();
    let track = Track::new(track)?;

    let mut document = MapDocument::new(project_name, track.start(), style.zoom_start);
    document.track_length_km = track.length_km();

    for layer in &style.tile_layers {
        document.add_base_layer(TileLayer::from(layer));
    }

    document.add_locate_control(style.locate_control_position);

    let mut track_layer = TrackLayerBuilder::new(&style.track_color, style.track_weight, style.track_opacity);
    track_layer.add_track(track.points());

    let ranks = FilterRankTable::new(
        include_filters.unwrap_or_default(),
        &style.marker_color_palette,
        &style.default_marker_color,
    );

    let mut poi_layer = PoiLayerBuilder::new(&ranks, &style.marker_icon, style.popup_max_width);
    for poi in pois {
        poi_layer.add(poi);
    }
    let skipped = poi_layer.skipped();

    document
        .add_overlay(track_layer.finish())
        .add_overlay(poi_layer.finish())
        .add_layer_control(style.layer_control_position, style.layer_control_collapsed);

    info!(
        "composed map '{}': {} markers ({} skipped), {} ranked filters, {:.1} km track",
        project_name,
        document.marker_count(),
        skipped,
        ranks.len(),
        document.track_length_km
    );

    Ok(document)
}

/// Compose the map and write it to
/// `{output_dir}/{project_name}_{timestamp}.html`.
///
/// `output_dir` is created if absent. Without an explicit `timestamp` the
/// current local time is used (`YYYYMMDD_HHMMSS`); pass one for
/// reproducible file names. Returns the path of the written document.
pub fn compose(
    pois: &[PoiRecord],
    track: &[GpsPoint],
    output_dir: impl AsRef<Path>,
    project_name: &str,
    style: &StyleConfig,
    include_filters: Option<&[String]>,
    timestamp: Option<&str>,
) -> Result<PathBuf> {
    let timestamp = match timestamp {
        Some(ts) => ts.to_string(),
        None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
    };
    let file_name = output_file_name(project_name, &timestamp)?;

    let document = compose_document(pois, track, project_name, style, include_filters)?;

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join(file_name);
    document.save(&path)?;

    info!("map saved to {}", path.display());
    Ok(path)
}

/// `{project_name}_{timestamp}.html`
///
/// Both parts become a single file name, so blank values and path
/// separators are rejected.
pub fn output_file_name(project_name: &str, timestamp: &str) -> Result<String> {
    for (label, value) in [("project name", project_name), ("timestamp", timestamp)] {
        if value.trim().is_empty() {
            return Err(MapError::InvalidInput(format!("{} must not be empty", label)));
        }
        if value.contains(['/', '\\']) || value == ".." {
            return Err(MapError::InvalidInput(format!(
                "{} '{}' must not contain path separators",
                label, value
            )));
        }
    }

    Ok(format!("{}_{}.{}", project_name, timestamp, DOCUMENT_EXTENSION))
}
