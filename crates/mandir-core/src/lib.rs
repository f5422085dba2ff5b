pub mod app_config;
pub mod config;
pub mod distance;
pub mod geo;
pub mod place;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{annotate_and_sort, format_distance};
pub use geo::{great_circle_distance_km, Coordinate, RegionBounds};
pub use place::{DistanceAnnotatedPlace, Place, Review};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid region bounds: {0}")]
    InvalidRegionBounds(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
