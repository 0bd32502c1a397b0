//! Edge costs, urgency bonuses and the deadline-risk penalty.

mod model;

pub use model::{is_due, CostModel};
