//! Filter rank table: which marker color each include filter gets.
//!
//! The include filters are supplied in priority order. A filter at list
//! position `i` is drawn in `palette[i % palette.len()]`; anything else
//! (unknown filter, empty filter, no filter) is drawn in the default color.
//! The table is a pure function of the filter list and the palette, so
//! identical inputs always produce identical colors.

use log::{debug, warn};
use std::collections::HashMap;

/// Mapping from include-filter identifier to marker color.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRankTable {
    ranks: HashMap<String, Rank>,
    default_color: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Rank {
    position: usize,
    color: String,
}

impl FilterRankTable {
    /// Build the table from filters in priority order.
    ///
    /// A filter listed more than once takes the rank of its last occurrence.
    /// Every entry occupies its list position, so every other filter keeps
    /// `palette[i % len]`. An empty palette maps every filter to
    /// `default_color`.
    ///
    /// # Example
    /// ```
    /// use alonggpx_map::FilterRankTable;
    ///
    /// let filters = vec!["amenity=cafe".to_string(), "shop=bakery".to_string()];
    /// let palette = vec!["red".to_string(), "blue".to_string()];
    /// let table = FilterRankTable::new(&filters, &palette, "gray");
    ///
    /// assert_eq!(table.color_for(Some("amenity=cafe")), "red");
    /// assert_eq!(table.color_for(Some("shop=bakery")), "blue");
    /// assert_eq!(table.color_for(Some("tourism=camp_site")), "gray");
    /// assert_eq!(table.color_for(None), "gray");
    /// ```
    pub fn new(include_filters: &[String], palette: &[String], default_color: &str) -> Self {
        if palette.is_empty() && !include_filters.is_empty() {
            warn!(
                "marker color palette is empty; all {} filter(s) render as {}",
                include_filters.len(),
                default_color
            );
        }

        let mut ranks = HashMap::with_capacity(include_filters.len());

        for (position, filter) in include_filters.iter().enumerate() {
            if filter.is_empty() {
                continue;
            }
            let color = if palette.is_empty() {
                default_color.to_string()
            } else {
                palette[position % palette.len()].clone()
            };

            debug!("filter rank {} '{}' -> {}", position, filter, color);
            if let Some(earlier) = ranks.insert(filter.clone(), Rank { position, color }) {
                warn!(
                    "duplicate include filter '{}': rank {} replaces rank {}",
                    filter, position, earlier.position
                );
            }
        }

        Self {
            ranks,
            default_color: default_color.to_string(),
        }
    }

    /// Resolve the marker color for a POI's matching filter.
    pub fn color_for(&self, matching_filter: Option<&str>) -> &str {
        matching_filter
            .filter(|f| !f.is_empty())
            .and_then(|f| self.ranks.get(f))
            .map(|rank| rank.color.as_str())
            .unwrap_or(self.default_color.as_str())
    }

    /// Priority position of a filter in the include list, if ranked.
    pub fn rank(&self, filter: &str) -> Option<usize> {
        self.ranks.get(filter).map(|rank| rank.position)
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Number of distinct ranked filters.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
