//! Route evaluation.
//!
//! The single source of truth for route distance, time, load, feasibility
//! and weighted cost.

mod evaluator;

pub use evaluator::{evaluate_route, RouteEvaluation, RouteEvaluator};
