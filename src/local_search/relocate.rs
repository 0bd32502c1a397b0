//! Inter-route bin relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each bin from its current route to every insertion position
//! in every other route whose vehicle has room for it. The delta is the cost
//! change of both affected routes, each re-evaluated in full.
//!
//! # Complexity
//!
//! O(n² × R) evaluations per call, each O(n).
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::evaluation::RouteEvaluator;

use super::state::{Move, SearchState};

/// Finds the best improving single-bin relocation between two routes.
///
/// Moves that would push the target vehicle over capacity are skipped.
pub fn best_relocate(state: &SearchState, evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    let routes = state.routes();
    if routes.len() < 2 {
        return None;
    }

    let loads: Vec<u32> = routes.iter().map(|seq| evaluator.load(seq)).collect();
    let mut best: Option<Move> = None;

    for (from_r, from_seq) in routes.iter().enumerate() {
        for from_pos in 0..from_seq.len() {
            let bin = from_seq[from_pos];
            let bin_load = evaluator.load(&[bin]);

            let mut shortened = from_seq.clone();
            shortened.remove(from_pos);
            let removal_delta = evaluator.cost(&shortened, from_r) - state.route_cost(from_r);

            for (to_r, to_seq) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }
                if loads[to_r].saturating_add(bin_load) > evaluator.capacity(to_r) {
                    continue;
                }

                let mut extended = Vec::with_capacity(to_seq.len() + 1);
                for to_pos in 0..=to_seq.len() {
                    extended.clear();
                    extended.extend_from_slice(&to_seq[..to_pos]);
                    extended.push(bin);
                    extended.extend_from_slice(&to_seq[to_pos..]);

                    let insertion_delta = evaluator.cost(&extended, to_r) - state.route_cost(to_r);
                    let delta = removal_delta + insertion_delta;

                    let mv = Move::Relocate {
                        from_route: from_r,
                        from_pos,
                        to_route: to_r,
                        to_pos,
                        delta,
                    };
                    if mv.is_improving() && best.as_ref().is_none_or(|b| delta < b.delta()) {
                        best = Some(mv);
                    }
                }
            }
        }
    }

    best
}
