//! # waste-routing
//!
//! Route optimization for garbage-collection fleets: given geolocated bins
//! with fill levels and a fleet of capacitated vehicles, builds per-vehicle
//! collection routes that favor urgent bins and short driving distance.
//!
//! ## Modules
//!
//! - [`models`]: Value types (Bin, Vehicle, Route, Plan, unassigned reports)
//! - [`geo`]: Coordinates, haversine distance and the distance matrix index
//! - [`cost`]: Urgency-weighted edge costs and deadline-risk penalty
//! - [`evaluation`]: Route metrics and feasibility, recomputed from scratch
//! - [`constructive`]: Greedy nearest-urgent-neighbor construction
//! - [`local_search`]: 2-opt, inter-route relocation, unassigned insertion
//! - [`optimizer`]: The `optimize` entry point, restarts and cancellation
//! - [`config`]: Optimizer configuration
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```
//! use waste_routing::config::OptimizerConfig;
//! use waste_routing::geo::GeoPoint;
//! use waste_routing::models::{Bin, Vehicle};
//! use waste_routing::optimizer::optimize;
//!
//! let depot = GeoPoint::new(17.385, 78.486);
//! let bins = vec![
//!     Bin::new("BIN001", GeoPoint::new(17.390, 78.490), 92),
//!     Bin::new("BIN002", GeoPoint::new(17.380, 78.480), 40),
//!     Bin::new("BIN003", GeoPoint::new(17.395, 78.470), 85),
//! ];
//! let fleet = vec![Vehicle::new("TRUCK-1", 10, depot)];
//!
//! let result = optimize(&bins, &fleet, &OptimizerConfig::default()).unwrap();
//! assert_eq!(result.metrics.bins_to_collect, 2);
//! assert!(result.unassigned.is_empty());
//! ```

pub mod config;
pub mod constructive;
pub mod cost;
pub mod error;
pub mod evaluation;
pub mod geo;
pub mod local_search;
pub mod models;
pub mod optimizer;
