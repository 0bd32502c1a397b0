//! Local search operators for improving collection plans.
//!
//! - [`best_two_opt`]: Intra-route segment reversal
//! - [`best_relocate`]: Inter-route single-bin relocation
//! - [`best_insertion`]: Routing of bins left out for lack of capacity
//!
//! Each operator scans its whole neighborhood and returns the best strictly
//! improving [`Move`], scored by [`RouteEvaluator`].

mod insert;
mod relocate;
mod state;
mod two_opt;

pub use insert::best_insertion;
pub use relocate::best_relocate;
pub use state::{Move, SearchState, IMPROVEMENT_EPS};
pub use two_opt::best_two_opt;

use crate::evaluation::RouteEvaluator;

/// Best improving move over all operators, or `None` at a local optimum.
///
/// Ties favor 2-opt, then relocation, then insertion, so the choice is
/// deterministic.
pub fn best_move(state: &SearchState, evaluator: &RouteEvaluator<'_>) -> Option<Move> {
    [
        best_two_opt(state, evaluator),
        best_relocate(state, evaluator),
        best_insertion(state, evaluator),
    ]
    .into_iter()
    .flatten()
    .fold(None, |best: Option<Move>, mv| match best {
        Some(b) if b.delta() <= mv.delta() => Some(b),
        _ => Some(mv),
    })
}
