//! Constructive heuristics for building initial collection plans.
//!
//! - [`nearest_urgent_neighbor`]: Greedy nearest-urgent-neighbor, optionally
//!   randomized over a restricted candidate list

mod nearest_urgent;

pub use nearest_urgent::{nearest_urgent_neighbor, RESTRICTED_CANDIDATES};
