use thiserror::Error;

use crate::cities::CityTableError;
use crate::config::ConfigError;

/// Rejected caller input. Never retried; surfaced as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("stop list is empty")]
    EmptyStops,
    #[error("coordinate out of range for {name}: lat={lat}, lon={lon}")]
    InvalidCoordinate { name: String, lat: f64, lon: f64 },
    #[error("duplicate city in table: {0}")]
    DuplicateCity(String),
    #[error("invalid shipment feature {field}: {reason}")]
    InvalidFeature { field: &'static str, reason: String },
    #[error("forecast horizon must be between 1 and {max} days, got {got}")]
    InvalidHorizon { got: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum RouteIqError {
    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("city table error: {0}")]
    CityTable(#[from] CityTableError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
