//! Coordinates, great-circle distance and the per-run distance index.
//!
//! Distances are haversine kilometers, optionally scaled by a road
//! circuity factor.

mod index;
mod matrix;
mod point;

pub use index::GeoIndex;
pub use matrix::DistanceMatrix;
pub use point::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
