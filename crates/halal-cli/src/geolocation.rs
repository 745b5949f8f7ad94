use halal_core::{Coordinates, CoreError};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub(crate) enum GeolocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
pub(crate) trait Geolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position supplied up front, e.g. from `--lat`/`--lng`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedPosition {
    lat: f64,
    lng: f64,
}

impl FixedPosition {
    pub(crate) fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Coordinates::new(self.lat, self.lng).map_err(|e| match e {
            CoreError::InvalidCoordinates(reason) => GeolocationError::Unavailable(reason),
            other => GeolocationError::Unavailable(other.to_string()),
        })
    }
}

/// Terminals have no positioning hardware to ask.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Unsupported;

impl Geolocator for Unsupported {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}
