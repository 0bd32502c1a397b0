//! Route evaluator that computes distance, timing, load, feasibility and cost.

use chrono::Utc;
use serde::Serialize;

use crate::config::OptimizerConfig;
use crate::cost::CostModel;
use crate::error::GeoError;
use crate::geo::GeoIndex;
use crate::models::{Bin, Route, Vehicle, Visit};

/// Metrics of one route, recomputed from its bin sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEvaluation {
    /// Depot-to-depot driving distance in kilometers.
    pub distance_km: f64,
    /// Driving time at the average speed plus per-stop service time.
    pub time_min: f64,
    /// Sum of bin loads.
    pub load: u32,
    /// `load <= vehicle.capacity`.
    pub feasible: bool,
    /// Weighted cost: edge costs, return leg and deadline risk.
    pub cost: f64,
}

/// Evaluates bin sequences against a vehicle.
///
/// Every call walks the sequence from scratch; nothing is cached between
/// calls, so local-search scoring and reported metrics always agree.
///
/// Sequences are indices into `bins`; vehicles are indices into the fleet
/// the [`GeoIndex`] was built from.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::cost::CostModel;
/// use waste_routing::evaluation::RouteEvaluator;
/// use waste_routing::geo::{GeoIndex, GeoPoint};
/// use waste_routing::models::{Bin, Vehicle};
///
/// let bins = vec![
///     Bin::new("B1", GeoPoint::new(17.390, 78.490), 90),
///     Bin::new("B2", GeoPoint::new(17.400, 78.470), 85),
/// ];
/// let fleet = vec![Vehicle::new("T1", 5, GeoPoint::new(17.385, 78.486))];
/// let config = OptimizerConfig::default();
/// let geo = GeoIndex::build(&bins, &fleet, config.detour_factor).unwrap();
/// let cost = CostModel::from_config(&config, chrono::Utc::now());
///
/// let evaluator = RouteEvaluator::new(&bins, &fleet, &geo, &cost, &config);
/// let eval = evaluator.evaluate(&[0, 1], 0);
/// assert_eq!(eval.load, 2);
/// assert!(eval.feasible);
/// assert!(eval.distance_km > 0.0);
/// ```
pub struct RouteEvaluator<'a> {
    bins: &'a [Bin],
    vehicles: &'a [Vehicle],
    geo: &'a GeoIndex,
    cost: &'a CostModel,
    average_speed_kmh: f64,
    service_time_min: f64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator over one run's data.
    pub fn new(
        bins: &'a [Bin],
        vehicles: &'a [Vehicle],
        geo: &'a GeoIndex,
        cost: &'a CostModel,
        config: &OptimizerConfig,
    ) -> Self {
        Self {
            bins,
            vehicles,
            geo,
            cost,
            average_speed_kmh: config.average_speed_kmh,
            service_time_min: config.service_time_per_bin_min,
        }
    }

    /// Computes the metrics of `seq` driven by vehicle `v`.
    pub fn evaluate(&self, seq: &[usize], v: usize) -> RouteEvaluation {
        self.walk(seq, v, None)
    }

    /// Weighted cost of `seq` driven by vehicle `v`.
    pub fn cost(&self, seq: &[usize], v: usize) -> f64 {
        self.walk(seq, v, None).cost
    }

    /// Capacity of vehicle `v`.
    pub fn capacity(&self, v: usize) -> u32 {
        self.vehicles[v].capacity
    }

    /// Sum of bin loads in `seq`.
    pub fn load(&self, seq: &[usize]) -> u32 {
        seq.iter()
            .fold(0u32, |acc, &b| acc.saturating_add(self.bins[b].load))
    }

    /// Builds the reported [`Route`] for `seq`, with per-stop timing.
    pub fn build_route(&self, seq: &[usize], v: usize) -> Route {
        let mut visits = Vec::with_capacity(seq.len());
        let eval = self.walk(seq, v, Some(&mut visits));
        Route::new(
            self.vehicles[v].id.clone(),
            visits,
            eval.distance_km,
            eval.time_min,
            eval.load,
            eval.cost,
        )
    }

    fn travel_min(&self, km: f64) -> f64 {
        km / self.average_speed_kmh * 60.0
    }

    fn walk(&self, seq: &[usize], v: usize, mut visits: Option<&mut Vec<Visit>>) -> RouteEvaluation {
        let mut distance_km = 0.0;
        let mut clock_min = 0.0;
        let mut load: u32 = 0;
        let mut cost = 0.0;
        let mut prev: Option<usize> = None;

        for &b in seq {
            let bin = &self.bins[b];
            let leg = match prev {
                None => self.geo.depot_to_bin(v, b),
                Some(p) => self.geo.bin_to_bin(p, b),
            };
            distance_km += leg;
            clock_min += self.travel_min(leg);
            let arrival = clock_min;

            cost += self.cost.edge_cost(leg, self.cost.urgency_bonus(bin));
            cost += self.cost.deadline_risk(bin, arrival);

            clock_min += self.service_time_min;
            load = load.saturating_add(bin.load);

            if let Some(out) = visits.as_deref_mut() {
                out.push(Visit {
                    bin_id: bin.id.clone(),
                    arrival_min: arrival,
                    departure_min: clock_min,
                    load_after: load,
                });
            }
            prev = Some(b);
        }

        if let Some(last) = prev {
            let leg = self.geo.bin_to_depot(last, v);
            distance_km += leg;
            cost += self.cost.return_cost(leg);
        }

        RouteEvaluation {
            distance_km,
            time_min: self.travel_min(distance_km) + self.service_time_min * seq.len() as f64,
            load,
            feasible: load <= self.vehicles[v].capacity,
            cost,
        }
    }
}

/// Evaluates `bins`, visited in the given order, as a route of `vehicle`.
///
/// Uses the same code path as the optimizer, so numbers match the metrics of
/// a returned plan for the same sequence and configuration.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::evaluation::evaluate_route;
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::{Bin, Vehicle};
///
/// let bins = vec![Bin::new("B1", GeoPoint::new(17.390, 78.490), 90)];
/// let truck = Vehicle::new("T1", 1, GeoPoint::new(17.385, 78.486));
/// let eval = evaluate_route(&bins, &truck, &OptimizerConfig::default()).unwrap();
/// assert!(eval.feasible);
/// assert_eq!(eval.load, 1);
/// ```
pub fn evaluate_route(
    bins: &[Bin],
    vehicle: &Vehicle,
    config: &OptimizerConfig,
) -> Result<RouteEvaluation, GeoError> {
    let fleet = std::slice::from_ref(vehicle);
    let geo = GeoIndex::build(bins, fleet, config.detour_factor)?;
    let cost = CostModel::from_config(config, config.reference_time.unwrap_or_else(Utc::now));
    let evaluator = RouteEvaluator::new(bins, fleet, &geo, &cost, config);
    let seq: Vec<usize> = (0..bins.len()).collect();
    Ok(evaluator.evaluate(&seq, 0))
}
