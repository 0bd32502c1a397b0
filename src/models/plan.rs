//! Plans and unassigned-bin reports.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{BinId, Route, VehicleId};

/// Why a bin was not placed on any route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnassignedReason {
    /// The bin's latitude or longitude is out of range.
    InvalidCoordinate,
    /// The bin's fill level is above 100 percent.
    InvalidFillLevel,
    /// The bin's load is zero.
    InvalidLoad,
    /// Another bin with the same id appeared earlier in the request.
    DuplicateId,
    /// The fleet had no capacity left for this due bin.
    CapacityExceeded,
}

/// A bin the optimizer could not route, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnassignedBin {
    /// The affected bin.
    pub bin_id: BinId,
    /// Why it was left out.
    pub reason: UnassignedReason,
}

/// The per-vehicle route assignment produced by one optimization call.
///
/// Every vehicle in the request has an entry, possibly an empty route.
/// A plan is immutable once returned.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::{Vehicle, VehicleId};
/// use waste_routing::optimizer::optimize;
///
/// let fleet = vec![Vehicle::new("T1", 4, GeoPoint::new(17.385, 78.486))];
/// let result = optimize(&[], &fleet, &OptimizerConfig::default()).unwrap();
/// assert_eq!(result.plan.num_routes(), 1);
/// assert!(result.plan.route(&VehicleId::from("T1")).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    routes: BTreeMap<VehicleId, Route>,
    total_cost: f64,
}

impl Plan {
    pub(crate) fn new(routes: BTreeMap<VehicleId, Route>, total_cost: f64) -> Self {
        Self { routes, total_cost }
    }

    /// Routes keyed by vehicle id.
    pub fn routes(&self) -> &BTreeMap<VehicleId, Route> {
        &self.routes
    }

    /// The route of one vehicle.
    pub fn route(&self, vehicle: &VehicleId) -> Option<&Route> {
        self.routes.get(vehicle)
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of bins served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.values().map(Route::len).sum()
    }

    /// Total distance across all routes.
    pub fn total_distance_km(&self) -> f64 {
        self.routes.values().map(Route::total_distance_km).sum()
    }

    /// Total driving and service time across all routes.
    pub fn total_time_min(&self) -> f64 {
        self.routes.values().map(Route::total_time_min).sum()
    }

    /// Objective value: route costs plus unassigned penalties.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}
