//! Google Maps web-service response types.
//!
//! Every endpoint wraps its payload in `{"status": "OK", ...}`; anything other
//! than `"OK"` is a failure for that call, including `"ZERO_RESULTS"`.
//! [`CandidatePlace`] and [`PlaceDetail`] are the trimmed shapes the search
//! pipeline works with.

use halal_core::Coordinates;
use serde::Deserialize;

/// Status string the upstream uses for a successful call.
pub const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

// ---------------------------------------------------------------------------
// geocode/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

// ---------------------------------------------------------------------------
// place/nearbysearch/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One entry of a nearby-search page.
#[derive(Debug, Deserialize)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    pub geometry: Geometry,
    /// Not part of the documented response; passed through when present.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

// ---------------------------------------------------------------------------
// place/details/json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetailsResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetailsResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// ---------------------------------------------------------------------------
// Pipeline shapes
// ---------------------------------------------------------------------------

/// A place stub from nearby search, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePlace {
    pub place_id: String,
    pub name: String,
    pub vicinity: String,
    pub approx_location: Coordinates,
    /// Upstream `distance` when present, otherwise `0`.
    pub raw_distance: f64,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
}

impl From<NearbyPlace> for CandidatePlace {
    fn from(place: NearbyPlace) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            vicinity: place.vicinity,
            approx_location: place.geometry.location.into(),
            raw_distance: place.distance.unwrap_or(0.0),
            rating: place.rating,
            rating_count: place.user_ratings_total,
        }
    }
}

/// Enrichment attributes for one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetail {
    pub formatted_address: Option<String>,
    /// Photo references in upstream order.
    pub photos: Vec<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
}

impl From<PlaceDetailsResult> for PlaceDetail {
    fn from(result: PlaceDetailsResult) -> Self {
        Self {
            formatted_address: result.formatted_address.filter(|a| !a.trim().is_empty()),
            photos: result
                .photos
                .into_iter()
                .map(|p| p.photo_reference)
                .collect(),
            rating: result.rating,
            rating_count: result.user_ratings_total,
        }
    }
}
