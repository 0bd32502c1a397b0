//! Route and visit types.

use serde::Serialize;

use super::{BinId, VehicleId};

/// A single stop within a route.
///
/// Times are minutes since the vehicle left its start depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// Bin being emptied.
    pub bin_id: BinId,
    /// Arrival time at the bin.
    pub arrival_min: f64,
    /// Departure time (arrival + service time).
    pub departure_min: f64,
    /// Cumulative load after emptying this bin.
    pub load_after: u32,
}

/// An ordered sequence of bin visits owned by one vehicle.
///
/// The route starts and ends at the vehicle's depots (not stored in
/// `visits`). Totals are produced by
/// [`RouteEvaluator`](crate::evaluation::RouteEvaluator) and cannot be
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    vehicle_id: VehicleId,
    visits: Vec<Visit>,
    total_distance_km: f64,
    total_time_min: f64,
    total_load: u32,
    cost: f64,
}

impl Route {
    pub(crate) fn new(
        vehicle_id: VehicleId,
        visits: Vec<Visit>,
        total_distance_km: f64,
        total_time_min: f64,
        total_load: u32,
        cost: f64,
    ) -> Self {
        Self {
            vehicle_id,
            visits,
            total_distance_km,
            total_time_min,
            total_load,
            cost,
        }
    }

    /// The vehicle that drives this route.
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// Stops in visiting order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of bins visited.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if the vehicle stays at the depot.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Bin ids in visiting order.
    pub fn bin_ids(&self) -> Vec<&BinId> {
        self.visits.iter().map(|v| &v.bin_id).collect()
    }

    /// Depot-to-depot driving distance.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Driving plus service time.
    pub fn total_time_min(&self) -> f64 {
        self.total_time_min
    }

    /// Sum of bin loads.
    pub fn total_load(&self) -> u32 {
        self.total_load
    }

    /// Weighted cost used by the optimizer.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}
