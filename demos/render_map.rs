//! Render a small POI map along a track in the French Alps.
//!
//! Run with: cargo run --example render_map [style.json]
//!
//! Set `RUST_LOG=debug` to see every marker's color decision.

use alonggpx_map::{compose, GpsPoint, PoiRecord, StyleConfig};

fn poi(name: &str, km: f64, off_track: f64, filter: Option<&str>, lat: f64, lon: f64) -> PoiRecord {
    PoiRecord {
        name: name.to_string(),
        distance_from_start_km: km,
        distance_from_track_km: off_track,
        matching_filter: filter.map(str::to_string),
        latitude: lat,
        longitude: lon,
        ..Default::default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let style = match std::env::args().nth(1) {
        Some(path) => StyleConfig::from_json_file(path)?,
        None => StyleConfig::default(),
    };

    // (lon, lat) pairs, as a GPX parser yields them
    let raw_track = [(5.7245, 45.1885), (5.7600, 45.2100), (5.8000, 45.2400), (5.8500, 45.2600)];
    let track: Vec<GpsPoint> = raw_track
        .iter()
        .map(|&(lon, lat)| GpsPoint::from_lon_lat(lon, lat))
        .collect();

    let mut bakery = poi("Boulangerie du Col", 4.1, 0.12, Some("shop=bakery"), 45.2110, 5.7620);
    bakery.opening_hours = Some("Tu-Su 07:00-13:00".to_string());

    let mut water = poi("Fontaine", 7.9, 0.02, Some("amenity=drinking_water"), 45.2395, 5.8010);
    water.website = Some("https://www.openstreetmap.org".to_string());

    let pois = vec![
        poi("Cafe de la Place", 0.3, 0.05, Some("amenity=cafe"), 45.1890, 5.7250),
        bakery,
        water,
        poi("Refuge", 12.4, 0.80, None, 45.2610, 5.8490),
    ];

    let include_filters = vec![
        "amenity=drinking_water".to_string(),
        "amenity=cafe".to_string(),
        "shop=bakery".to_string(),
    ];

    let output_dir = std::env::temp_dir().join("alonggpx-map-demo");
    let path = compose(
        &pois,
        &track,
        &output_dir,
        "alps",
        &style,
        Some(include_filters.as_slice()),
        None,
    )?;

    println!("Map written to {}", path.display());
    Ok(())
}
