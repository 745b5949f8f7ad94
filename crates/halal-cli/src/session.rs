//! Search state for one interactive session.
//!
//! A [`SearchSession`] owns the three pieces of view state (results, loading
//! flag, error text) and replaces them wholesale on every attempt.

use halal_core::{Location, PlaceResult, SearchResponse};

use crate::client::PlacesApiClient;
use crate::geolocation::Geolocator;

pub(crate) const EMPTY_LOCATION_MESSAGE: &str = "Please enter a location";
pub(crate) const GENERIC_SEARCH_ERROR: &str = "An error occurred while searching";

#[derive(Debug, Default)]
pub(crate) struct SearchSession {
    pub results: Vec<PlaceResult>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Searches around a free-text address. Blank input is rejected locally.
    pub(crate) async fn search_by_address(
        &mut self,
        api: &PlacesApiClient,
        address: &str,
        radius: Option<u32>,
    ) {
        let address = address.trim();
        if address.is_empty() {
            self.error = Some(EMPTY_LOCATION_MESSAGE.to_string());
            return;
        }

        self.begin();
        let response = api
            .search(&Location::Address(address.to_string()), radius)
            .await;
        self.apply(response);
    }

    /// Searches around wherever `geolocator` says the user is.
    pub(crate) async fn search_by_current_location<G: Geolocator>(
        &mut self,
        api: &PlacesApiClient,
        geolocator: &G,
        radius: Option<u32>,
    ) {
        self.begin();
        match geolocator.current_position().await {
            Ok(coords) => {
                let response = api.search(&Location::Coords(coords), radius).await;
                self.apply(response);
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not determine current location");
                self.results.clear();
                self.error = Some(e.to_string());
                self.loading = false;
            }
        }
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn apply(&mut self, response: SearchResponse) {
        if response.is_success() {
            self.results = response.results;
            self.error = None;
        } else {
            self.results.clear();
            self.error = Some(
                response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_SEARCH_ERROR.to_string()),
            );
        }
        self.loading = false;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
