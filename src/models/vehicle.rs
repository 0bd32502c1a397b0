//! Collection vehicles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Stable identifier of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        VehicleId(id.to_owned())
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        VehicleId(id)
    }
}

/// A vehicle that leaves its start depot, collects bins and drives to its
/// end depot.
///
/// # Examples
///
/// ```
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::Vehicle;
///
/// let depot = GeoPoint::new(17.385, 78.486);
/// let v = Vehicle::new("TRUCK-1", 20, depot);
/// assert_eq!(v.capacity, 20);
/// assert_eq!(v.end_depot(), depot);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier.
    pub id: VehicleId,
    /// Capacity per trip, in the same units as [`Bin::load`](super::Bin::load).
    pub capacity: u32,
    /// Start depot.
    pub start: GeoPoint,
    /// End depot; `None` means the vehicle returns to `start`.
    #[serde(default)]
    pub end: Option<GeoPoint>,
}

impl Vehicle {
    /// Creates a vehicle that starts and ends at `depot`.
    pub fn new(id: impl Into<VehicleId>, capacity: u32, depot: GeoPoint) -> Self {
        Self {
            id: id.into(),
            capacity,
            start: depot,
            end: None,
        }
    }

    /// Sets a distinct end depot.
    pub fn with_end(mut self, end: GeoPoint) -> Self {
        self.end = Some(end);
        self
    }

    /// The depot the route finishes at.
    pub fn end_depot(&self) -> GeoPoint {
        self.end.unwrap_or(self.start)
    }
}
