//! The search pipeline: resolve a location, find candidates, enrich them.
//!
//! Location resolution and candidate search are sequential and abort the
//! whole search on failure. Enrichment fans out one detail lookup per
//! candidate, waits for all of them, and drops any candidate whose lookup
//! failed. Survivors keep the order nearby search returned them in.

use futures::future::join_all;
use halal_core::{Coordinates, Location, PlaceResult, SearchQuery};

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{CandidatePlace, PlaceDetail};

/// Decodes the raw `location` parameter.
///
/// # Errors
///
/// Returns [`PlacesError::Geocode`] when the value is a coordinate object
/// that cannot be read. It is never retried as an address.
pub fn parse_location(raw: &str) -> Result<Location, PlacesError> {
    Location::from_param(raw).map_err(|e| {
        tracing::warn!(error = %e, "location parameter is not a valid coordinate object");
        PlacesError::Geocode {
            status: format!("INVALID_COORDINATES: {e}"),
        }
    })
}

/// Turns a location into coordinates. Coordinates pass through without a
/// network call; addresses cost one geocoding call.
///
/// # Errors
///
/// Propagates [`PlacesClient::geocode`] failures.
pub async fn resolve_location(
    client: &PlacesClient,
    location: &Location,
) -> Result<Coordinates, PlacesError> {
    match location {
        Location::Coords(coords) => Ok(*coords),
        Location::Address(address) => client.geocode(address).await,
    }
}

/// Runs one nearby search around `origin` using the query's radius and keyword.
///
/// # Errors
///
/// Propagates [`PlacesClient::nearby_search`] failures.
pub async fn search_candidates(
    client: &PlacesClient,
    origin: Coordinates,
    query: &SearchQuery,
) -> Result<Vec<CandidatePlace>, PlacesError> {
    client
        .nearby_search(origin, query.radius, &query.keyword)
        .await
}

/// Looks up details for every candidate concurrently and merges each
/// success into a [`PlaceResult`]. Failed lookups are logged and dropped.
pub async fn enrich_candidates(
    client: &PlacesClient,
    candidates: Vec<CandidatePlace>,
) -> Vec<PlaceResult> {
    let lookups = candidates
        .iter()
        .map(|candidate| client.place_details(&candidate.place_id));
    let details = join_all(lookups).await;

    candidates
        .into_iter()
        .zip(details)
        .filter_map(|(candidate, detail)| match detail {
            Ok(detail) => Some(merge_candidate(candidate, detail, |r| client.photo_url(r))),
            Err(e) => {
                tracing::warn!(
                    place_id = %candidate.place_id,
                    error = %e,
                    "dropping candidate, detail lookup failed"
                );
                None
            }
        })
        .collect()
}

/// Combines a candidate stub with its detail record.
///
/// The address falls back to the candidate's vicinity, and ratings fall back
/// to the stub's own values. Location and distance always come from the
/// candidate.
pub fn merge_candidate(
    candidate: CandidatePlace,
    detail: PlaceDetail,
    photo_url: impl Fn(&str) -> String,
) -> PlaceResult {
    let vicinity = Some(candidate.vicinity).filter(|v| !v.trim().is_empty());
    let address = detail
        .formatted_address
        .or_else(|| vicinity.clone())
        .unwrap_or_default();

    PlaceResult {
        id: candidate.place_id,
        name: candidate.name,
        address,
        distance: candidate.raw_distance,
        rating: detail.rating.or(candidate.rating),
        total_ratings: detail.rating_count.or(candidate.rating_count),
        photo_url: detail.photos.first().map(|r| photo_url(r.as_str())),
        vicinity,
        location: candidate.approx_location,
    }
}

/// Runs the full pipeline for one query.
///
/// # Errors
///
/// Returns the first failure from location resolution or candidate search.
/// Per-candidate detail failures never surface here.
pub async fn search_places(
    client: &PlacesClient,
    query: &SearchQuery,
) -> Result<Vec<PlaceResult>, PlacesError> {
    let origin = resolve_location(client, &query.location).await?;
    let candidates = search_candidates(client, origin, query).await?;
    let candidate_count = candidates.len();

    let results = enrich_candidates(client, candidates).await;

    tracing::info!(
        origin = %origin,
        radius = query.radius,
        keyword = %query.keyword,
        candidates = candidate_count,
        results = results.len(),
        dropped = candidate_count - results.len(),
        "places search completed"
    );

    Ok(results)
}
