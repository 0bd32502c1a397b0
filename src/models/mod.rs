//! Domain model types for collection routing.
//!
//! Bins and vehicles are supplied fresh with every request; routes and plans
//! are derived by the optimizer and immutable once returned.

mod bin;
mod plan;
mod route;
mod vehicle;

pub use bin::{Bin, BinId};
pub use plan::{Plan, UnassignedBin, UnassignedReason};
pub use route::{Route, Visit};
pub use vehicle::{Vehicle, VehicleId};
