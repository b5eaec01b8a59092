//! HTML shell of the map document.
//!
//! The page loads Leaflet and its plugins from public CDNs and rebuilds the
//! map from the embedded document JSON, so the output is a single file.

use tera::{Context, Tera};

use crate::document::MapDocument;
use crate::error::Result;

const TEMPLATE_NAME: &str = "map.html";

const MAP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
  <title>{{ title }}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css" />
  <link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet-locatecontrol/0.66.2/L.Control.Locate.min.css" />
  <script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet-locatecontrol/0.66.2/L.Control.Locate.min.js"></script>
  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    (function () {
      var doc = {{ document_json | safe }};

      var map = L.map("map", {
        center: [doc.center.latitude, doc.center.longitude],
        zoom: doc.zoom_start
      });

      var baseLayers = {};
      doc.base_layers.forEach(function (layer, index) {
        var tiles = L.tileLayer(layer.url, { attribution: layer.attribution });
        if (index === 0) {
          tiles.addTo(map);
        }
        baseLayers[layer.name] = tiles;
      });

      if (doc.locate_control) {
        L.control.locate({ position: doc.locate_control.position }).addTo(map);
      }

      var overlays = {};
      doc.overlays.forEach(function (overlay) {
        var group = L.featureGroup();
        overlay.features.forEach(function (feature) {
          if (feature.type === "polyline") {
            L.polyline(feature.coordinates, {
              color: feature.color,
              weight: feature.weight,
              opacity: feature.opacity
            }).addTo(group);
          } else if (feature.type === "marker") {
            L.marker([feature.latitude, feature.longitude], {
              icon: L.AwesomeMarkers.icon({
                icon: feature.icon,
                markerColor: feature.color,
                prefix: "glyphicon"
              })
            }).bindPopup(feature.popup_html, { maxWidth: feature.popup_max_width }).addTo(group);
          }
        });
        if (overlay.show) {
          group.addTo(map);
        }
        overlays[overlay.name] = group;
      });

      if (doc.layer_control) {
        L.control.layers(baseLayers, overlays, {
          position: doc.layer_control.position,
          collapsed: doc.layer_control.collapsed
        }).addTo(map);
      }
    })();
  </script>
</body>
</html>
"#;

/// Render the complete HTML page for `document`.
pub(crate) fn render(document: &MapDocument) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, MAP_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("title", &document.title);
    context.insert("document_json", &script_safe_json(document)?);

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

/// Serialize to JSON that can sit inside a `<script>` element.
fn script_safe_json(document: &MapDocument) -> Result<String> {
    Ok(serde_json::to_string(document)?.replace("</", "<\\/"))
}
