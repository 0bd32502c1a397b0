//! Route optimization entry point.
//!
//! A run validates the request, selects due bins by priority, builds routes
//! with [`nearest_urgent_neighbor`], then applies best-improvement local
//! search until no move improves, the iteration bound is reached, or the
//! caller cancels. Optional randomized restarts repeat construction and
//! search with seeded tie-breaking and keep the cheapest plan.
//!
//! The optimizer is an anytime algorithm: cancellation returns the best plan
//! found so far, flagged as cancelled.

mod cancel;
mod request;

pub use cancel::{CancellationCheck, Deadline, NeverCancel};

use std::collections::BTreeMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::OptimizerConfig;
use crate::constructive::nearest_urgent_neighbor;
use crate::cost::CostModel;
use crate::error::{ConfigError, OptimizeError};
use crate::evaluation::RouteEvaluator;
use crate::geo::GeoIndex;
use crate::local_search::{best_move, SearchState, IMPROVEMENT_EPS};
use crate::models::{Bin, Plan, UnassignedBin, UnassignedReason, Vehicle};

use cancel::RunGuard;
use request::{prepare, select_by_priority, Instance, Selection};

/// Aggregate figures for a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetrics {
    /// Sum of route distances.
    pub total_distance_km: f64,
    /// Sum of route durations.
    pub total_time_min: f64,
    /// Distance saved versus visiting each route's bins in id order, in percent.
    pub fuel_saved_estimate_pct: f64,
    /// Number of bins routed.
    pub bins_to_collect: usize,
    /// Objective value of the plan.
    pub total_cost: f64,
    /// Local-search moves applied, summed over restarts.
    pub iterations: usize,
}

/// Result of one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimization {
    /// Route per vehicle.
    pub plan: Plan,
    /// Bins not routed, with reasons, ascending by bin id.
    pub unassigned: Vec<UnassignedBin>,
    /// Aggregate metrics.
    pub metrics: PlanMetrics,
    /// `true` if the search stopped early on cancellation or time limit.
    pub cancelled: bool,
}

/// Builds collection plans with a fixed configuration.
///
/// The optimizer holds no per-request state, so one instance can serve
/// concurrent calls.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::{Bin, Vehicle};
/// use waste_routing::optimizer::RouteOptimizer;
///
/// let optimizer = RouteOptimizer::new(OptimizerConfig::default()).unwrap();
/// let bins = vec![Bin::new("BIN001", GeoPoint::new(17.39, 78.49), 95)];
/// let fleet = vec![Vehicle::new("T1", 5, GeoPoint::new(17.385, 78.486))];
///
/// let stop = AtomicBool::new(false);
/// let result = optimizer.optimize_with_cancel(&bins, &fleet, &stop).unwrap();
/// assert_eq!(result.plan.num_served(), 1);
/// assert!(!result.cancelled);
/// ```
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

/// Best state of one construction + search run.
struct RunOutcome {
    state: SearchState,
    iterations: usize,
    cancelled: bool,
}

impl RouteOptimizer {
    /// Creates an optimizer after validating `config`.
    pub fn new(config: OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimizes without an external stop signal.
    ///
    /// A configured `time_limit_ms` still applies.
    pub fn optimize(&self, bins: &[Bin], vehicles: &[Vehicle]) -> Result<Optimization, OptimizeError> {
        self.optimize_with_cancel(bins, vehicles, &NeverCancel)
    }

    /// Optimizes, polling `cancel` once per improvement iteration.
    pub fn optimize_with_cancel<C: CancellationCheck + ?Sized>(
        &self,
        bins: &[Bin],
        vehicles: &[Vehicle],
        cancel: &C,
    ) -> Result<Optimization, OptimizeError> {
        let config = &self.config;
        let guard = RunGuard::new(cancel, config.time_limit_ms);
        let cost = CostModel::from_config(config, config.reference_time.unwrap_or_else(Utc::now));

        let Instance {
            bins,
            vehicles,
            rejected,
        } = prepare(bins, vehicles, &cost)?;
        log::debug!(
            "optimizing {} due bin(s) over {} vehicle(s), {} rejected",
            bins.len(),
            vehicles.len(),
            rejected.len()
        );

        let geo = GeoIndex::build(&bins, &vehicles, config.detour_factor)?;
        let evaluator = RouteEvaluator::new(&bins, &vehicles, &geo, &cost, config);
        let selection = select_by_priority(&bins, &vehicles, &cost);

        let mut best = self.run(&bins, &geo, &cost, &evaluator, &selection, None, &guard);
        let mut iterations = best.iterations;
        let mut cancelled = best.cancelled;

        for restart in 1..=config.restarts {
            if cancelled || guard.is_cancelled() {
                cancelled = true;
                break;
            }
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(restart as u64));
            let outcome = self.run(&bins, &geo, &cost, &evaluator, &selection, Some(&mut rng), &guard);
            iterations += outcome.iterations;
            cancelled |= outcome.cancelled;
            if outcome.state.total_cost() < best.state.total_cost() - IMPROVEMENT_EPS {
                log::trace!(
                    "restart {restart} improved cost {:.3} -> {:.3}",
                    best.state.total_cost(),
                    outcome.state.total_cost()
                );
                best = outcome;
            }
        }

        if cancelled {
            log::debug!("search cancelled after {iterations} iteration(s)");
        }

        let total_cost = best.state.total_cost();
        let (routes, pending) = best.state.into_parts();

        let mut plan_routes = BTreeMap::new();
        let mut baseline_km = 0.0;
        for (v, seq) in routes.iter().enumerate() {
            let mut id_order = seq.clone();
            id_order.sort_unstable();
            baseline_km += evaluator.evaluate(&id_order, v).distance_km;
            plan_routes.insert(vehicles[v].id.clone(), evaluator.build_route(seq, v));
        }
        let plan = Plan::new(plan_routes, total_cost);

        let mut unassigned = rejected;
        unassigned.extend(pending.into_iter().map(|b| UnassignedBin {
            bin_id: bins[b].id.clone(),
            reason: UnassignedReason::CapacityExceeded,
        }));
        unassigned.sort_by(|a, b| a.bin_id.cmp(&b.bin_id));

        let total_distance_km = plan.total_distance_km();
        let metrics = PlanMetrics {
            total_distance_km,
            total_time_min: plan.total_time_min(),
            fuel_saved_estimate_pct: fuel_saved_pct(baseline_km, total_distance_km),
            bins_to_collect: plan.num_served(),
            total_cost,
            iterations,
        };
        log::debug!(
            "plan: {} bin(s) routed, {} unassigned, {:.2} km, cost {:.3}",
            metrics.bins_to_collect,
            unassigned.len(),
            metrics.total_distance_km,
            metrics.total_cost
        );

        Ok(Optimization {
            plan,
            unassigned,
            metrics,
            cancelled,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run<C: CancellationCheck + ?Sized>(
        &self,
        bins: &[Bin],
        geo: &GeoIndex,
        cost: &CostModel,
        evaluator: &RouteEvaluator<'_>,
        selection: &Selection,
        rng: Option<&mut StdRng>,
        cancel: &C,
    ) -> RunOutcome {
        let routes = nearest_urgent_neighbor(bins, geo, cost, &selection.buckets, rng);
        let pending = selection.rejected.clone();

        let mut state = SearchState::new(routes, pending, evaluator, self.config.unassigned_penalty);
        let constructed_cost = state.total_cost();

        let mut iterations = 0;
        let mut cancelled = false;
        while iterations < self.config.max_iterations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            match best_move(&state, evaluator) {
                Some(mv) => {
                    state.apply(&mv, evaluator);
                    iterations += 1;
                }
                None => break,
            }
        }
        log::trace!(
            "construction cost {constructed_cost:.3}, improved to {:.3} in {iterations} move(s)",
            state.total_cost()
        );

        RunOutcome {
            state,
            iterations,
            cancelled,
        }
    }
}

/// Optimizes `bins` over `vehicles` with `config`.
///
/// Shorthand for [`RouteOptimizer::new`] followed by [`RouteOptimizer::optimize`].
///
/// Identical inputs give identical output only when
/// [`reference_time`](OptimizerConfig::reference_time) is set. Otherwise
/// staleness is measured from the wall clock at each call, so route costs,
/// and occasionally the chosen bins, drift between calls.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::{Bin, UnassignedReason, Vehicle};
/// use waste_routing::optimizer::optimize;
///
/// let depot = GeoPoint::new(17.385, 78.486);
/// let bins = vec![
///     Bin::new("BIN001", GeoPoint::new(17.390, 78.490), 95),
///     Bin::new("BIN002", GeoPoint::new(200.0, 78.490), 95),
/// ];
/// let fleet = vec![Vehicle::new("T1", 5, depot)];
///
/// let result = optimize(&bins, &fleet, &OptimizerConfig::default()).unwrap();
/// assert_eq!(result.plan.num_served(), 1);
/// assert_eq!(result.unassigned[0].reason, UnassignedReason::InvalidCoordinate);
/// ```
pub fn optimize(
    bins: &[Bin],
    vehicles: &[Vehicle],
    config: &OptimizerConfig,
) -> Result<Optimization, OptimizeError> {
    RouteOptimizer::new(config.clone())?.optimize(bins, vehicles)
}

fn fuel_saved_pct(baseline_km: f64, optimized_km: f64) -> f64 {
    if baseline_km <= 0.0 {
        return 0.0;
    }
    ((baseline_km - optimized_km) / baseline_km * 100.0).max(0.0)
}
