use thiserror::Error;

/// Errors returned by the places client and the search pipeline.
///
/// The `Display` text of [`PlacesError::Geocode`] and [`PlacesError::Search`]
/// is what end users see in the error envelope, so it stays short and free
/// of upstream detail. The upstream status is carried in the fields for logs.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream call did not finish within the configured timeout.
    #[error("upstream request timed out: {context}")]
    Timeout { context: String },

    /// Geocoding returned a non-`OK` status, zero results, or the supplied
    /// coordinates could not be read.
    #[error("Failed to geocode address")]
    Geocode { status: String },

    /// Nearby search returned a non-`OK` status.
    #[error("Failed to fetch places")]
    Search { status: String },

    /// Detail lookup for one place returned a non-`OK` status.
    #[error("failed to fetch details for place {place_id}: {status}")]
    Details { place_id: String, status: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl PlacesError {
    /// Short machine-readable name for logs. Never sent to clients.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PlacesError::Http(_) => "upstream_transport_failure",
            PlacesError::Timeout { .. } => "upstream_timeout",
            PlacesError::Geocode { .. } => "geocode_failure",
            PlacesError::Search { .. } => "search_failure",
            PlacesError::Details { .. } => "details_failure",
            PlacesError::Deserialize { .. } => "upstream_decode_failure",
            PlacesError::InvalidBaseUrl(_) => "configuration_error",
        }
    }
}
