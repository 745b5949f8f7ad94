pub mod app_config;
pub mod config;
pub mod format;
pub mod places;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use format::{directions_url, format_distance};
pub use places::{
    parse_radius, Coordinates, Location, PlaceResult, SearchQuery, SearchResponse, SearchStatus,
    DEFAULT_KEYWORD, DEFAULT_RADIUS_METERS, MAX_RADIUS_METERS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("radius must be an integer between 1 and {max}, got \"{0}\"", max = MAX_RADIUS_METERS)]
    InvalidRadius(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
