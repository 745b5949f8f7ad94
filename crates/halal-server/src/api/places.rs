//! `GET /api/places`: the single search endpoint.
//!
//! Requests are validated (credential, then `location`, then `radius`) before
//! any upstream call. Once a search starts, every outcome is a
//! [`SearchResponse`]: 200 on success, 500 with `status: "error"` otherwise.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use halal_core::{parse_radius, SearchQuery, SearchResponse, DEFAULT_KEYWORD};
use halal_places::{parse_location, PlacesError};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PlacesParams {
    pub location: Option<String>,
    pub radius: Option<String>,
    pub keyword: Option<String>,
}

pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PlacesParams>,
) -> Response {
    let Some(client) = state.places.as_deref() else {
        tracing::error!(
            request_id = %req_id.0,
            kind = "configuration_error",
            "rejecting search: GOOGLE_PLACES_API_KEY is not configured"
        );
        return envelope(
            StatusCode::INTERNAL_SERVER_ERROR,
            SearchResponse::error("API key not configured"),
        );
    };

    let Some(raw_location) = params
        .location
        .as_deref()
        .filter(|l| !l.trim().is_empty())
    else {
        return ApiError::new(req_id.0, "bad_request", "Location is required").into_response();
    };

    let radius = match parse_radius(params.radius.as_deref()) {
        Ok(radius) => radius,
        Err(e) => return ApiError::new(req_id.0, "bad_request", e.to_string()).into_response(),
    };

    let location = match parse_location(raw_location) {
        Ok(location) => location,
        Err(e) => return search_failed(&req_id, &e),
    };

    let query = SearchQuery::new(location)
        .with_radius(radius)
        .with_keyword(params.keyword.as_deref().unwrap_or(DEFAULT_KEYWORD));

    match halal_places::search_places(client, &query).await {
        Ok(results) => envelope(StatusCode::OK, SearchResponse::success(results)),
        Err(e) => search_failed(&req_id, &e),
    }
}

fn search_failed(req_id: &RequestId, error: &PlacesError) -> Response {
    tracing::error!(
        request_id = %req_id.0,
        kind = error.kind(),
        error = ?error,
        "places search failed"
    );
    envelope(
        StatusCode::INTERNAL_SERVER_ERROR,
        SearchResponse::error(error.to_string()),
    )
}

fn envelope(status: StatusCode, body: SearchResponse) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "places_test.rs"]
mod tests;
