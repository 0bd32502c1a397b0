//! Error types for distance computation, configuration and optimization.

use thiserror::Error;

use crate::models::VehicleId;

/// Errors raised while computing distances.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude is outside `±90` / `±180`, or not finite.
    #[error("invalid coordinate (lat {lat}, lng {lng})")]
    InvalidCoordinate {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },
}

/// Errors raised while loading or validating an [`OptimizerConfig`](crate::config::OptimizerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse optimizer configuration")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A field holds a value outside its allowed range.
    #[error("configuration field `{field}` is invalid: {reason}")]
    InvalidField {
        /// Configuration key (camelCase, as in JSON).
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

/// Request-level failures of [`optimize`](crate::optimizer::optimize).
///
/// Per-bin problems never surface here; they are reported in
/// [`Optimization::unassigned`](crate::optimizer::Optimization::unassigned).
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Due bins were supplied but the fleet is empty.
    #[error("no vehicles available for {due_bins} due bin(s)")]
    NoCapacityAvailable {
        /// Number of valid due bins that could not be served.
        due_bins: usize,
    },
    /// A vehicle is structurally unusable.
    #[error("vehicle {id} is invalid: {reason}")]
    InvalidVehicle {
        /// Identifier of the offending vehicle.
        id: VehicleId,
        /// Description of the problem.
        reason: String,
    },
    /// The configuration failed validation.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    /// Building the distance index failed.
    #[error("failed to build the distance index")]
    Geo(#[from] GeoError),
}
