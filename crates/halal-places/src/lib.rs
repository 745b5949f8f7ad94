pub mod client;
pub mod error;
pub mod search;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use search::{
    enrich_candidates, merge_candidate, parse_location, resolve_location, search_candidates,
    search_places,
};
pub use types::{CandidatePlace, PlaceDetail};
