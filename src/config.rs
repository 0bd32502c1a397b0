//! Optimizer configuration.
//!
//! All cost-weighting constants are configurable. The JSON form uses
//! camelCase keys and every key is optional:
//!
//! ```
//! use waste_routing::config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_json_str(
//!     r#"{ "collectionThresholdPct": 75, "maxIterations": 200 }"#,
//! ).unwrap();
//! assert_eq!(config.collection_threshold_pct, 75);
//! assert_eq!(config.max_iterations, 200);
//! assert_eq!(config.distance_weight, 1.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable parameters for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Cost per kilometer driven.
    pub distance_weight: f64,
    /// Bonus for a full bin (scaled by `fill_level / 100`).
    pub urgency_weight: f64,
    /// Bonus per day since the last collection.
    pub staleness_weight: f64,
    /// Fill percentage at or above which a bin is due.
    pub collection_threshold_pct: u8,
    /// Penalty per hour of arrival delay at a full bin.
    pub deadline_risk_weight: f64,
    /// Staleness cap in days; also used for never-collected bins.
    pub max_staleness_days: f64,
    /// Cost charged for each due bin left unrouted for lack of capacity.
    pub unassigned_penalty: f64,
    /// Upper bound on applied local-search moves.
    pub max_iterations: usize,
    /// Average driving speed used to convert distance to time.
    pub average_speed_kmh: f64,
    /// Fixed time spent at each stop, in minutes.
    pub service_time_per_bin_min: f64,
    /// Road circuity factor applied to great-circle distance (>= 1).
    pub detour_factor: f64,
    /// Number of additional randomized construction restarts.
    pub restarts: usize,
    /// Base seed for randomized restarts.
    pub seed: u64,
    /// Wall-clock budget for the whole run, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Instant staleness is measured against. `None` uses the current time,
    /// read once per call; set it to get repeatable costs across calls.
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            distance_weight: 1.0,
            urgency_weight: 10.0,
            staleness_weight: 0.5,
            collection_threshold_pct: 80,
            deadline_risk_weight: 1.0,
            max_staleness_days: 14.0,
            unassigned_penalty: 1000.0,
            max_iterations: 1000,
            average_speed_kmh: 25.0,
            service_time_per_bin_min: 3.0,
            detour_factor: 1.0,
            restarts: 0,
            seed: 0,
            time_limit_ms: None,
            reference_time: None,
        }
    }
}

impl OptimizerConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the per-kilometer weight.
    pub fn with_distance_weight(mut self, weight: f64) -> Self {
        self.distance_weight = weight;
        self
    }

    /// Sets the fill-level bonus weight.
    pub fn with_urgency_weight(mut self, weight: f64) -> Self {
        self.urgency_weight = weight;
        self
    }

    /// Sets the per-day staleness bonus weight.
    pub fn with_staleness_weight(mut self, weight: f64) -> Self {
        self.staleness_weight = weight;
        self
    }

    /// Sets the due threshold in percent.
    pub fn with_collection_threshold_pct(mut self, pct: u8) -> Self {
        self.collection_threshold_pct = pct;
        self
    }

    /// Sets the deadline-risk weight.
    pub fn with_deadline_risk_weight(mut self, weight: f64) -> Self {
        self.deadline_risk_weight = weight;
        self
    }

    /// Sets the unassigned-bin penalty.
    pub fn with_unassigned_penalty(mut self, penalty: f64) -> Self {
        self.unassigned_penalty = penalty;
        self
    }

    /// Sets the local-search iteration bound.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the average driving speed.
    pub fn with_average_speed_kmh(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    /// Sets the per-stop service time.
    pub fn with_service_time_per_bin_min(mut self, minutes: f64) -> Self {
        self.service_time_per_bin_min = minutes;
        self
    }

    /// Sets the road circuity factor.
    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        self.detour_factor = factor;
        self
    }

    /// Enables `n` randomized restarts seeded from `seed`.
    pub fn with_restarts(mut self, n: usize, seed: u64) -> Self {
        self.restarts = n;
        self.seed = seed;
        self
    }

    /// Sets a wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Pins the instant staleness is measured against.
    pub fn with_reference_time(mut self, at: DateTime<Utc>) -> Self {
        self.reference_time = Some(at);
        self
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("distanceWeight", self.distance_weight)?;
        non_negative("urgencyWeight", self.urgency_weight)?;
        non_negative("stalenessWeight", self.staleness_weight)?;
        non_negative("deadlineRiskWeight", self.deadline_risk_weight)?;
        non_negative("maxStalenessDays", self.max_staleness_days)?;
        non_negative("unassignedPenalty", self.unassigned_penalty)?;
        non_negative("serviceTimePerBinMin", self.service_time_per_bin_min)?;
        if self.collection_threshold_pct > 100 {
            return Err(ConfigError::InvalidField {
                field: "collectionThresholdPct",
                reason: format!("must be at most 100, got {}", self.collection_threshold_pct),
            });
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(ConfigError::InvalidField {
                field: "averageSpeedKmh",
                reason: format!("must be positive, got {}", self.average_speed_kmh),
            });
        }
        if !self.detour_factor.is_finite() || self.detour_factor < 1.0 {
            return Err(ConfigError::InvalidField {
                field: "detourFactor",
                reason: format!("must be at least 1.0, got {}", self.detour_factor),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidField {
            field,
            reason: format!("must be a finite non-negative number, got {value}"),
        })
    }
}
