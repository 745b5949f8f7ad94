//! Display helpers shared by every presentation of a [`crate::PlaceResult`].

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Renders a distance in meters as `"850 m"` below one kilometer and
/// `"1.2 km"` at or above it.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Builds a Google Maps directions link for a free-text destination.
#[must_use]
pub fn directions_url(destination: &str) -> String {
    let encoded = utf8_percent_encode(destination, NON_ALPHANUMERIC);
    format!("https://www.google.com/maps/dir/?api=1&destination={encoded}")
}
