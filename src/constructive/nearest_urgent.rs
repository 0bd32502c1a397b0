//! Nearest-urgent-neighbor constructive heuristic.
//!
//! Orders each vehicle's reserved bins greedily: starting from the vehicle's
//! depot, always append the unvisited bin with the lowest edge cost from the
//! current tail, where edge cost is distance minus urgency bonus.
//!
//! Which bins a vehicle carries is decided beforehand by priority selection,
//! so every reserved bin ends up on a route.
//!
//! # Complexity
//!
//! O(k² log k) per vehicle, where k = bins in its bucket.

use rand::Rng;

use crate::cost::CostModel;
use crate::geo::GeoIndex;
use crate::models::Bin;

/// Number of cheapest candidates a randomized construction chooses among.
pub const RESTRICTED_CANDIDATES: usize = 3;

/// Orders every bucket with the nearest-urgent-neighbor rule.
///
/// `buckets[v]` holds the bins reserved for vehicle `v`; the result has one
/// sequence per bucket containing exactly those bins.
///
/// Without `rng` the pass is deterministic: the cheapest candidate wins and
/// ties go to the lowest index (bins are indexed in ascending id order).
/// With `rng`, each step picks uniformly among the
/// [`RESTRICTED_CANDIDATES`] cheapest bins, for randomized restarts.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::constructive::nearest_urgent_neighbor;
/// use waste_routing::cost::CostModel;
/// use waste_routing::geo::{GeoIndex, GeoPoint};
/// use waste_routing::models::{Bin, Vehicle};
///
/// let bins = vec![
///     Bin::new("B1", GeoPoint::new(0.0, 0.3), 90),
///     Bin::new("B2", GeoPoint::new(0.0, 0.1), 90),
///     Bin::new("B3", GeoPoint::new(0.0, 0.2), 90),
/// ];
/// let fleet = vec![Vehicle::new("T1", 5, GeoPoint::new(0.0, 0.0))];
/// let config = OptimizerConfig::default();
/// let geo = GeoIndex::build(&bins, &fleet, 1.0).unwrap();
/// let cost = CostModel::from_config(&config, chrono::Utc::now());
///
/// let routes = nearest_urgent_neighbor::<rand::rngs::StdRng>(
///     &bins, &geo, &cost, &[vec![0, 1, 2]], None,
/// );
/// assert_eq!(routes, vec![vec![1, 2, 0]]);
/// ```
pub fn nearest_urgent_neighbor<R: Rng + ?Sized>(
    bins: &[Bin],
    geo: &GeoIndex,
    cost: &CostModel,
    buckets: &[Vec<usize>],
    mut rng: Option<&mut R>,
) -> Vec<Vec<usize>> {
    let mut routes = Vec::with_capacity(buckets.len());

    for (v, bucket) in buckets.iter().enumerate() {
        let mut open: Vec<usize> = bucket.clone();
        let mut seq: Vec<usize> = Vec::with_capacity(open.len());

        while !open.is_empty() {
            let tail = seq.last().copied();
            let mut ranked: Vec<(f64, usize)> = open
                .iter()
                .enumerate()
                .map(|(slot, &b)| {
                    let leg = match tail {
                        None => geo.depot_to_bin(v, b),
                        Some(t) => geo.bin_to_bin(t, b),
                    };
                    (cost.edge_cost(leg, cost.urgency_bonus(&bins[b])), slot)
                })
                .collect();
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(open[a.1].cmp(&open[b.1])));

            let slot = match rng.as_deref_mut() {
                Some(rng) => ranked[rng.random_range(0..ranked.len().min(RESTRICTED_CANDIDATES))].1,
                None => ranked[0].1,
            };
            seq.push(open.remove(slot));
        }

        routes.push(seq);
    }

    routes
}
