//! Insertion of capacity-rejected bins.
//!
//! After relocations free up room, a bin that initially found no vehicle may
//! now fit. Routing it removes its unassigned penalty from the plan cost.

use crate::evaluation::RouteEvaluator;

use super::state::{Move, SearchState};

/// Finds the cheapest improving insertion of a pending bin into a route with room.
pub fn best_insertion(state: &SearchState, evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    if state.pending().is_empty() {
        return None;
    }

    let loads: Vec<u32> = state.routes().iter().map(|seq| evaluator.load(seq)).collect();
    let mut best: Option<Move> = None;

    for (pending_pos, &bin) in state.pending().iter().enumerate() {
        let bin_load = evaluator.load(&[bin]);

        for (r, seq) in state.routes().iter().enumerate() {
            if loads[r].saturating_add(bin_load) > evaluator.capacity(r) {
                continue;
            }

            let mut extended = Vec::with_capacity(seq.len() + 1);
            for pos in 0..=seq.len() {
                extended.clear();
                extended.extend_from_slice(&seq[..pos]);
                extended.push(bin);
                extended.extend_from_slice(&seq[pos..]);

                let delta =
                    evaluator.cost(&extended, r) - state.route_cost(r) - state.unassigned_penalty();
                let mv = Move::Insert {
                    pending_pos,
                    route: r,
                    pos,
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
