//! Print the marker color each include filter gets.
//!
//! Run with: cargo run --example filter_ranks -- amenity=cafe shop=bakery ...

use alonggpx_map::{FilterRankTable, StyleConfig};

fn main() {
    let filters: Vec<String> = std::env::args().skip(1).collect();
    let style = StyleConfig::default();

    let table = FilterRankTable::new(&filters, &style.marker_color_palette, &style.default_marker_color);

    println!("Palette: {}", style.marker_color_palette.join(", "));
    println!("Default: {}\n", table.default_color());

    for filter in &filters {
        match table.rank(filter) {
            Some(rank) => println!("  #{:<3} {:<30} {}", rank, filter, table.color_for(Some(filter))),
            None => println!("       {:<30} {} (unranked)", filter, table.default_color()),
        }
    }
}
