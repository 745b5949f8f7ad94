//! HTTP client for the Google Maps geocoding and places web services.
//!
//! Wraps `reqwest` with credential handling, URL construction, and typed
//! response decoding. Each call checks the `"status"` field of the JSON
//! envelope and maps anything but `"OK"` to the matching [`PlacesError`].

use std::time::Duration;

use halal_core::{AppConfig, Coordinates};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::types::{
    CandidatePlace, GeocodeResponse, NearbySearchResponse, PlaceDetail, PlaceDetailsResponse,
    STATUS_OK,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_USER_AGENT: &str = "halal-finder/0.1 (places-search)";
const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;

/// Fields requested from the detail endpoint.
const DETAIL_FIELDS: &str = "formatted_address,photos,rating,user_ratings_total";

#[derive(Debug, Clone)]
struct Endpoints {
    geocode: Url,
    nearby: Url,
    details: Url,
    photo: Url,
}

impl Endpoints {
    fn resolve(base_url: &str) -> Result<Self, PlacesError> {
        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|e| PlacesError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| PlacesError::InvalidBaseUrl(format!("'{base_url}' + '{path}': {e}")))
        };

        Ok(Self {
            geocode: join("geocode/json")?,
            nearby: join("place/nearbysearch/json")?,
            details: join("place/details/json")?,
            photo: join("place/photo")?,
        })
    }
}

/// Client for the geocoding, nearby-search, and place-detail endpoints.
///
/// Holds the only copy of the upstream credential. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoints: Endpoints,
    photo_max_width: u32,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("endpoints", &self.endpoints)
            .field("photo_max_width", &self.photo_max_width)
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Self::build(api_key, timeout_secs, DEFAULT_USER_AGENT, base_url)
    }

    /// Creates a client from application config, or `None` when no
    /// credential is configured.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Option<Self>, PlacesError> {
        let Some(api_key) = config.places_api_key.as_deref() else {
            return Ok(None);
        };
        let client = Self::build(
            api_key,
            config.places_request_timeout_secs,
            &config.places_user_agent,
            &config.places_base_url,
        )?
        .with_photo_max_width(config.photo_max_width);
        Ok(Some(client))
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoints: Endpoints::resolve(base_url)?,
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
        })
    }

    /// Overrides the `maxwidth` used by [`PlacesClient::photo_url`].
    #[must_use]
    pub fn with_photo_max_width(mut self, width: u32) -> Self {
        self.photo_max_width = width;
        self
    }

    /// Resolves a free-text address to coordinates with one geocoding call.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Geocode`] if the status is not `"OK"` or there are no
    ///   results.
    /// - [`PlacesError::Http`] / [`PlacesError::Timeout`] on transport failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, PlacesError> {
        let url = self.build_url(&self.endpoints.geocode, &[("address", address)]);
        let body: GeocodeResponse = self.request_json(&url, "geocode").await?;

        if body.status != STATUS_OK {
            tracing::warn!(
                status = %body.status,
                error_message = body.error_message.as_deref().unwrap_or_default(),
                "geocode returned non-OK status"
            );
            return Err(PlacesError::Geocode {
                status: body.status,
            });
        }

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::Geocode {
                status: "ZERO_RESULTS".to_string(),
            })?;

        Ok(first.geometry.location.into())
    }

    /// Fetches one page of places matching `keyword` within `radius` meters
    /// of `origin`, in upstream order.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Search`] if the status is not `"OK"`, which includes
    ///   `"ZERO_RESULTS"`.
    /// - [`PlacesError::Http`] / [`PlacesError::Timeout`] on transport failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn nearby_search(
        &self,
        origin: Coordinates,
        radius: u32,
        keyword: &str,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        let location = origin.to_string();
        let radius = radius.to_string();
        let url = self.build_url(
            &self.endpoints.nearby,
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        );
        let body: NearbySearchResponse = self.request_json(&url, "nearbysearch").await?;

        if body.status != STATUS_OK {
            tracing::warn!(
                status = %body.status,
                error_message = body.error_message.as_deref().unwrap_or_default(),
                "nearby search returned non-OK status"
            );
            return Err(PlacesError::Search {
                status: body.status,
            });
        }

        Ok(body.results.into_iter().map(CandidatePlace::from).collect())
    }

    /// Fetches address, photos, and rating attributes for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Details`] if the status is not `"OK"`.
    /// - [`PlacesError::Http`] / [`PlacesError::Timeout`] on transport failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetail, PlacesError> {
        let url = self.build_url(
            &self.endpoints.details,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let body: PlaceDetailsResponse = self.request_json(&url, "details").await?;

        if body.status != STATUS_OK {
            return Err(PlacesError::Details {
                place_id: place_id.to_owned(),
                status: body.status,
            });
        }

        Ok(body.result.unwrap_or_default().into())
    }

    /// Builds the fetchable photo URL for a photo reference. Never called
    /// by this client; the URL is handed to whoever renders the result.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str) -> String {
        let max_width = self.photo_max_width.to_string();
        self.build_url(
            &self.endpoints.photo,
            &[("maxwidth", &max_width), ("photo_reference", photo_reference)],
        )
        .to_string()
    }

    /// Appends percent-encoded query parameters, then the credential.
    fn build_url(&self, endpoint: &Url, extra: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and decodes the body.
    ///
    /// `context` names the operation in errors; the URL is kept out of them
    /// because it carries the credential.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(e, context))?;
        let response = response
            .error_for_status()
            .map_err(|e| transport_error(e, context))?;
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, context))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn transport_error(error: reqwest::Error, context: &str) -> PlacesError {
    if error.is_timeout() {
        PlacesError::Timeout {
            context: context.to_owned(),
        }
    } else {
        PlacesError::Http(error.without_url())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
