//! Search inputs and the result envelope shared by the server and its clients.
//!
//! [`SearchResponse`] is the single shape every search path produces, whether
//! the search succeeded, the upstream failed, or the server was unreachable.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Search radius used when the caller does not supply one.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Largest radius the upstream nearby-search accepts.
pub const MAX_RADIUS_METERS: u32 = 50_000;

/// Keyword sent when the caller does not supply one, in query-string form.
pub const DEFAULT_KEYWORD: &str = "halal+meat";

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] when `lat` is outside
    /// `-90..=90` or `lng` is outside `-180..=180`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidCoordinates(format!(
                "latitude {lat} is out of range"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::InvalidCoordinates(format!(
                "longitude {lng} is out of range"
            )));
        }
        Ok(Self { lat, lng })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Where to search: either free text to geocode or an already-resolved point.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Address(String),
    Coords(Coordinates),
}

impl Location {
    /// Decodes the `location` query parameter.
    ///
    /// Accepted forms, checked in order:
    /// - a JSON object `{"lat": .., "lng": ..}`; a malformed object is an error,
    ///   never an address
    /// - a JSON string literal, decoded and always taken as an address
    /// - a bare `lat,lng` pair of in-range decimals
    /// - anything else, taken as an address
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinates`] when the value is a JSON
    /// object that does not describe a valid coordinate pair.
    pub fn from_param(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();

        if trimmed.starts_with('{') {
            let coords: Coordinates = serde_json::from_str(trimmed)
                .map_err(|e| CoreError::InvalidCoordinates(e.to_string()))?;
            return Coordinates::new(coords.lat, coords.lng).map(Location::Coords);
        }

        if trimmed.starts_with('"') {
            if let Ok(address) = serde_json::from_str::<String>(trimmed) {
                return Ok(Location::Address(address.trim().to_string()));
            }
        }

        Ok(parse_coordinate_pair(trimmed).map_or_else(
            || Location::Address(trimmed.to_string()),
            Location::Coords,
        ))
    }

    /// Encodes this location the way [`Location::from_param`] reads it back.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Location::Address(address) => serde_json::Value::from(address.as_str()).to_string(),
            Location::Coords(coords) => {
                serde_json::json!({ "lat": coords.lat, "lng": coords.lng }).to_string()
            }
        }
    }
}

fn parse_coordinate_pair(text: &str) -> Option<Coordinates> {
    let (lat, lng) = text.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    Coordinates::new(lat, lng).ok()
}

/// Parses the optional `radius` query parameter.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRadius`] for anything other than an integer in
/// `1..=MAX_RADIUS_METERS`.
pub fn parse_radius(raw: Option<&str>) -> Result<u32, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_RADIUS_METERS);
    };
    raw.parse::<u32>()
        .ok()
        .filter(|r| (1..=MAX_RADIUS_METERS).contains(r))
        .ok_or_else(|| CoreError::InvalidRadius(raw.to_string()))
}

/// One search request after parameter decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location: Location,
    pub radius: u32,
    /// Plain-text keyword; `+` from a form-encoded value is already a space.
    pub keyword: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            radius: DEFAULT_RADIUS_METERS,
            keyword: normalize_keyword(DEFAULT_KEYWORD),
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the keyword; a blank value keeps the default.
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        let normalized = normalize_keyword(keyword);
        if !normalized.is_empty() {
            self.keyword = normalized;
        }
        self
    }
}

fn normalize_keyword(raw: &str) -> String {
    raw.replace('+', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A nearby place after enrichment. This is the only record that leaves the
/// server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    /// Formatted address, or the vicinity text when none was available.
    pub address: String,
    /// Meters, as reported upstream; `0` when upstream reports nothing.
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ratings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    pub location: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Success,
    Error,
}

/// The result envelope for every search path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub status: SearchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    #[must_use]
    pub fn success(results: Vec<PlaceResult>) -> Self {
        Self {
            results,
            status: SearchStatus::Success,
            message: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            status: SearchStatus::Error,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }
}

#[cfg(test)]
#[path = "places_test.rs"]
mod tests;
