//! POI records as produced by the discovery stage.
//!
//! Serde field names are the column names of the discovery table, so a
//! table exported as JSON records deserializes straight into [`PoiRecord`].

use serde::{Deserialize, Serialize};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::Result;
use crate::GpsPoint;

/// Placeholder shown when a POI has no matching filter.
pub const MISSING_FILTER_PLACEHOLDER: &str = "N/A";

/// URL schemes a website may link to. Anything else is shown as text.
const LINKABLE_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// One discovered point of interest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Cumulative distance along the track (km)
    #[serde(rename = "Kilometers from start", default)]
    pub distance_from_start_km: f64,

    /// Distance between the POI and the track (km)
    #[serde(rename = "Distance from track (km)", default)]
    pub distance_from_track_km: f64,

    /// Include filter that selected this POI
    #[serde(rename = "Matching Filter", default)]
    pub matching_filter: Option<String>,

    #[serde(rename = "lat")]
    pub latitude: f64,

    #[serde(rename = "lon")]
    pub longitude: f64,

    #[serde(rename = "Website", default)]
    pub website: Option<String>,

    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,

    #[serde(rename = "Opening hours", default)]
    pub opening_hours: Option<String>,
}

impl PoiRecord {
    /// Parse a JSON array of records (pandas `orient="records"` layout).
    ///
    /// ```
    /// use alonggpx_map::PoiRecord;
    ///
    /// let json = r#"[{"Name": "Cafe X", "Kilometers from start": 1.2,
    ///                 "Distance from track (km)": 0.05, "Matching Filter": "amenity=cafe",
    ///                 "lat": 45.05, "lon": 5.05}]"#;
    /// let records = PoiRecord::from_json_records(json).unwrap();
    /// assert_eq!(records[0].website, None);
    /// ```
    pub fn from_json_records(json: &str) -> Result<Vec<PoiRecord>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn location(&self) -> GpsPoint {
        GpsPoint::new(self.latitude, self.longitude)
    }

    /// The matching filter, with empty strings treated as absent.
    pub fn filter(&self) -> Option<&str> {
        self.matching_filter.as_deref().filter(|f| !f.is_empty())
    }

    /// HTML body of the marker popup.
    ///
    /// Text is escaped. The website becomes a link only for http(s) and
    /// mailto URLs; any other value is shown as plain text. Missing optional
    /// fields render as empty text, a missing filter as `N/A`.
    pub fn popup_html(&self) -> String {
        let website = match non_empty(&self.website) {
            Some(url) if is_linkable(url) => format!(
                "<a href=\"{}\" target=\"_blank\">{}</a>",
                encode_double_quoted_attribute(url),
                encode_text(url)
            ),
            Some(text) => encode_text(text).into_owned(),
            None => String::new(),
        };

        format!(
            "<b>{name}</b><br>\
             <b>Kilometers from start:</b> {from_start}<br>\
             <b>Distance from track:</b> {from_track} km<br>\
             <b>Filter:</b> {filter}<br>\
             <b>Website:</b> {website}<br>\
             <b>Phone:</b> {phone}<br>\
             <b>Opening hours:</b> {hours}",
            name = encode_text(&self.name),
            from_start = self.distance_from_start_km,
            from_track = self.distance_from_track_km,
            filter = encode_text(self.filter().unwrap_or(MISSING_FILTER_PLACEHOLDER)),
            website = website,
            phone = encode_text(non_empty(&self.phone).unwrap_or_default()),
            hours = encode_text(non_empty(&self.opening_hours).unwrap_or_default()),
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn is_linkable(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    LINKABLE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> PoiRecord {
        PoiRecord {
            name: "Cafe X".to_string(),
            distance_from_start_km: 1.2,
            distance_from_track_km: 0.05,
            matching_filter: Some("amenity=cafe".to_string()),
            latitude: 45.05,
            longitude: 5.05,
            website: Some("https://cafe.example".to_string()),
            phone: Some("+33 4 00 00 00 00".to_string()),
            opening_hours: Some("Mo-Fr 08:00-18:00".to_string()),
        }
    }

    #[test]
    fn test_popup_contains_all_fields() {
        let html = cafe().popup_html();
        assert!(html.contains("<b>Cafe X</b>"));
        assert!(html.contains("<b>Kilometers from start:</b> 1.2<br>"));
        assert!(html.contains("<b>Distance from track:</b> 0.05 km"));
        assert!(html.contains("<b>Filter:</b> amenity=cafe"));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("+33 4 00 00 00 00"));
        assert!(html.contains("Mo-Fr 08:00-18:00"));
    }

    #[test]
    fn test_popup_placeholders_for_missing_fields() {
        let poi = PoiRecord {
            name: "Bench".to_string(),
            ..Default::default()
        };
        let html = poi.popup_html();
        assert!(html.contains("<b>Filter:</b> N/A<br>"));
        assert!(html.contains("<b>Website:</b> <br>"));
        assert!(html.contains("<b>Phone:</b> <br>"));
        assert!(html.ends_with("<b>Opening hours:</b> "));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_empty_filter_is_absent() {
        let poi = PoiRecord {
            matching_filter: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(poi.filter(), None);
        assert!(poi.popup_html().contains("<b>Filter:</b> N/A"));
    }

    #[test]
    fn test_popup_escapes_text() {
        let poi = PoiRecord {
            name: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let html = poi.popup_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_records_tolerate_missing_and_null_columns() {
        let json = r#"[
            {"Name": "A", "lat": 45.0, "lon": 5.0, "Website": null},
            {"Name": "B", "Kilometers from start": 3.5, "Distance from track (km)": 0.2,
             "Matching Filter": "shop=bakery", "lat": 45.1, "lon": 5.1,
             "Website": "", "Phone": "123", "Opening hours": "24/7"}
        ]"#;
        let records = PoiRecord::from_json_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].website, None);
        assert_eq!(records[0].matching_filter, None);
        assert_eq!(records[1].filter(), Some("shop=bakery"));
        assert_eq!(records[1].location(), GpsPoint::new(45.1, 5.1));
    }

    #[test]
    fn test_website_with_script_scheme_is_not_linked() {
        let poi = PoiRecord {
            website: Some("javascript:alert(document.cookie)".to_string()),
            ..Default::default()
        };
        let html = poi.popup_html();
        assert!(!html.contains("<a "));
        assert!(!html.contains("href"));
        assert!(html.contains("<b>Website:</b> javascript:alert(document.cookie)<br>"));
    }

    #[test]
    fn test_website_link_schemes() {
        for url in ["http://cafe.example", "HTTPS://cafe.example/menu?a=1&b=2", "mailto:hi@cafe.example"] {
            let poi = PoiRecord {
                website: Some(url.to_string()),
                ..Default::default()
            };
            assert!(poi.popup_html().contains("<a href=\""), "{} should be linked", url);
        }
        for url in ["data:text/html,<b>x</b>", "ftp://cafe.example", "www.cafe.example"] {
            let poi = PoiRecord {
                website: Some(url.to_string()),
                ..Default::default()
            };
            assert!(!poi.popup_html().contains("<a "), "{} should not be linked", url);
        }
    }

    #[test]
    fn test_link_attribute_is_escaped() {
        let poi = PoiRecord {
            website: Some("https://cafe.example/\"onmouseover=\"x".to_string()),
            ..Default::default()
        };
        let html = poi.popup_html();
        assert!(html.contains("href=\"https://cafe.example/&quot;onmouseover=&quot;x\""));
    }

    #[test]
    fn test_slash_is_not_escaped() {
        let poi = PoiRecord {
            opening_hours: Some("24/7".to_string()),
            ..Default::default()
        };
        assert!(poi.popup_html().ends_with("<b>Opening hours:</b> 24/7"));
    }
}
