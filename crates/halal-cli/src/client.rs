//! Thin HTTP wrapper around the `halal-server` search endpoint.
//!
//! Every call resolves to a [`SearchResponse`]. Transport failures and
//! non-2xx replies are folded into an error envelope here so callers only
//! ever inspect `status` and `message`.

use std::time::Duration;

use halal_core::{Location, SearchResponse, DEFAULT_KEYWORD, DEFAULT_RADIUS_METERS};
use reqwest::{StatusCode, Url};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("Failed to reach search server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to fetch data")]
    Status(StatusCode),

    #[error("Failed to read search response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub(crate) struct PlacesApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PlacesApiClient {
    /// Builds a client for the server rooted at `server_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `server_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be constructed.
    pub(crate) fn new(server_url: &str) -> anyhow::Result<Self> {
        let mut base = Url::parse(server_url.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("server url must use http or https, got {server_url}");
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("api/places")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("halal-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs one search against the server. Never fails.
    pub(crate) async fn search(&self, location: &Location, radius: Option<u32>) -> SearchResponse {
        match self.fetch(location, radius).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "places search request failed");
                SearchResponse::error(e.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        location: &Location,
        radius: Option<u32>,
    ) -> Result<SearchResponse, FetchError> {
        let radius = radius.unwrap_or(DEFAULT_RADIUS_METERS).to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("location", location.to_param().as_str()),
                ("radius", radius.as_str()),
                ("keyword", DEFAULT_KEYWORD),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SearchResponse>()
                .await
                .map_err(|e| FetchError::Decode(e.without_url()));
        }

        // The server reports aggregation failures as a 500 carrying an error
        // envelope; surface its message instead of a generic one.
        match response.json::<SearchResponse>().await {
            Ok(envelope) if !envelope.is_success() => Ok(envelope),
            _ => {
                tracing::debug!(%status, "search server returned a non-envelope error");
                Err(FetchError::Status(status))
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
