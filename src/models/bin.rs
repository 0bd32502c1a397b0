//! Waste-collection bins.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Stable identifier of a bin. Ordered lexicographically; every tie-break
/// in the optimizer falls back to ascending bin id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(pub String);

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BinId {
    fn from(id: &str) -> Self {
        BinId(id.to_owned())
    }
}

impl From<String> for BinId {
    fn from(id: String) -> Self {
        BinId(id)
    }
}

/// A waste-collection point, as reported by the fill-level source.
///
/// `fill_level` is a percentage and must lie in `[0, 100]`; bins outside that
/// range are rejected by the optimizer. `load` is the capacity a vehicle
/// spends to empty the bin and defaults to one, so that vehicle capacity
/// reads as "bins per trip".
///
/// # Examples
///
/// ```
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::Bin;
///
/// let bin = Bin::new("BIN001", GeoPoint::new(17.385, 78.486), 90);
/// assert_eq!(bin.id.0, "BIN001");
/// assert_eq!(bin.load, 1);
/// assert!(bin.last_collected_at.is_none());
/// assert!(bin.is_due(80));
/// assert!(!bin.is_due(95));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Unique identifier.
    pub id: BinId,
    /// Geographic position.
    pub location: GeoPoint,
    /// Fill percentage.
    pub fill_level: u8,
    /// Time of the last emptying; `None` if never collected.
    #[serde(default)]
    pub last_collected_at: Option<DateTime<Utc>>,
    /// Capacity units consumed by servicing this bin; must be positive.
    #[serde(default = "default_load")]
    pub load: u32,
}

fn default_load() -> u32 {
    1
}

impl Bin {
    /// Creates a never-collected bin with unit load.
    pub fn new(id: impl Into<BinId>, location: GeoPoint, fill_level: u8) -> Self {
        Self {
            id: id.into(),
            location,
            fill_level,
            last_collected_at: None,
            load: 1,
        }
    }

    /// Sets the time of the last collection.
    pub fn with_last_collected_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_collected_at = Some(at);
        self
    }

    /// Sets the capacity units this bin consumes.
    pub fn with_load(mut self, load: u32) -> Self {
        self.load = load;
        self
    }

    /// Returns `true` if the fill level lies in `[0, 100]`.
    pub fn has_valid_fill_level(&self) -> bool {
        self.fill_level <= 100
    }

    /// Returns `true` if the bin consumes at least one capacity unit.
    pub fn has_valid_load(&self) -> bool {
        self.load > 0
    }

    /// Returns `true` if the bin meets the collection threshold.
    pub fn is_due(&self, threshold_pct: u8) -> bool {
        self.fill_level >= threshold_pct
    }
}
