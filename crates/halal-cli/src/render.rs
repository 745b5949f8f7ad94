use std::fmt::Write as _;

use halal_core::{directions_url, format_distance, PlaceResult};

pub(crate) const NO_RESULTS_NOTICE: &str = "No Results Found\n\
No halal meat shops found in this area. Try a different location or expand your search radius.";

/// Renders results as plain-text blocks, one per place, in server order.
pub(crate) fn render_results(results: &[PlaceResult]) -> String {
    if results.is_empty() {
        return format!("{NO_RESULTS_NOTICE}\n");
    }

    let mut out = String::new();
    for (i, place) in results.iter().enumerate() {
        let address = display_address(place);

        let _ = writeln!(out, "{}. {}", i + 1, place.name);
        let _ = writeln!(out, "   Address:    {address}");
        let _ = writeln!(out, "   Distance:   {}", format_distance(place.distance));
        if let Some(rating) = place.rating {
            match place.total_ratings {
                Some(total) => {
                    let _ = writeln!(out, "   Rating:     {rating:.1} ({total} reviews)");
                }
                None => {
                    let _ = writeln!(out, "   Rating:     {rating:.1}");
                }
            }
        }
        if let Some(photo) = &place.photo_url {
            let _ = writeln!(out, "   Photo:      {photo}");
        }
        let _ = writeln!(out, "   Directions: {}", directions_url(address));
        out.push('\n');
    }
    out
}

fn display_address(place: &PlaceResult) -> &str {
    if place.address.is_empty() {
        place.vicinity.as_deref().unwrap_or_default()
    } else {
        &place.address
    }
}
