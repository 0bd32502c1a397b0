//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For every pair of positions `i < j` in a route, reverse the segment
//! `[i..=j]` and re-evaluate the route. Because the objective includes
//! arrival-time dependent deadline risk, the delta is computed by full
//! re-evaluation rather than the classic four-edge formula.
//!
//! # Complexity
//!
//! O(n³) per route per call (O(n²) candidates, O(n) evaluation each).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::RouteEvaluator;

use super::state::{Move, SearchState};

/// Finds the best improving 2-opt reversal across all routes.
///
/// Returns `None` if no reversal lowers the cost. Ties keep the first move
/// found (lowest route, then lowest `i`, then lowest `j`).
pub fn best_two_opt(state: &SearchState, evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    let mut best: Option<Move> = None;

    for (r, seq) in state.routes().iter().enumerate() {
        let n = seq.len();
        if n < 2 {
            continue;
        }
        let current = state.route_cost(r);
        let mut candidate = seq.clone();

        for i in 0..n - 1 {
            for j in i + 1..n {
                candidate[i..=j].reverse();
                let delta = evaluator.cost(&candidate, r) - current;
                candidate[i..=j].reverse();

                let mv = Move::TwoOpt {
                    route: r,
                    i,
                    j,
                    delta,
                };
                if mv.is_improving() && best.as_ref().is_none_or(|b| delta < b.delta()) {
                    best = Some(mv);
                }
            }
        }
    }

    best
}
