//! Urgency-weighted cost model.

use chrono::{DateTime, Utc};

use crate::config::OptimizerConfig;
use crate::models::Bin;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts distances and bin urgency into scalar costs.
///
/// Lower is better. Driving costs `distance_weight` per kilometer; arriving
/// at a bin earns an urgency bonus that grows with fill level and time since
/// the last collection, so urgent bins are pulled forward even at some
/// distance penalty. A deadline-risk term charges for reaching full bins late
/// in the shift.
///
/// The model is a pure function of its inputs.
///
/// # Examples
///
/// ```
/// use waste_routing::config::OptimizerConfig;
/// use waste_routing::cost::CostModel;
/// use waste_routing::geo::GeoPoint;
/// use waste_routing::models::Bin;
///
/// let model = CostModel::from_config(&OptimizerConfig::default(), chrono::Utc::now());
/// let full = Bin::new("A", GeoPoint::new(0.0, 0.0), 100);
/// let half = Bin::new("B", GeoPoint::new(0.0, 0.0), 50);
/// assert!(model.urgency_bonus(&full) > model.urgency_bonus(&half));
/// assert!(model.is_due(&full));
/// assert!(!model.is_due(&half));
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    distance_weight: f64,
    urgency_weight: f64,
    staleness_weight: f64,
    deadline_risk_weight: f64,
    max_staleness_days: f64,
    collection_threshold_pct: u8,
    reference_time: DateTime<Utc>,
}

impl CostModel {
    /// Builds a model from configuration, measuring staleness against `reference_time`.
    pub fn from_config(config: &OptimizerConfig, reference_time: DateTime<Utc>) -> Self {
        Self {
            distance_weight: config.distance_weight,
            urgency_weight: config.urgency_weight,
            staleness_weight: config.staleness_weight,
            deadline_risk_weight: config.deadline_risk_weight,
            max_staleness_days: config.max_staleness_days,
            collection_threshold_pct: config.collection_threshold_pct,
            reference_time,
        }
    }

    /// Days since the bin was last emptied, clamped to `[0, max_staleness_days]`.
    ///
    /// Never-collected bins count as maximally stale; timestamps in the
    /// future count as fresh.
    pub fn staleness_days(&self, bin: &Bin) -> f64 {
        match bin.last_collected_at {
            None => self.max_staleness_days,
            Some(at) => {
                let elapsed = self.reference_time.signed_duration_since(at);
                let days = elapsed.num_seconds() as f64 / SECONDS_PER_DAY;
                days.clamp(0.0, self.max_staleness_days)
            }
        }
    }

    /// Bonus earned by visiting `bin`; grows with fill level and staleness.
    pub fn urgency_bonus(&self, bin: &Bin) -> f64 {
        let fill = f64::from(bin.fill_level.min(100)) / 100.0;
        self.urgency_weight * fill + self.staleness_weight * self.staleness_days(bin)
    }

    /// Ranking key for capacity-limited selection. Equal to the urgency bonus.
    pub fn priority_weight(&self, bin: &Bin) -> f64 {
        self.urgency_bonus(bin)
    }

    /// Cost of driving `distance_km` to a bin whose urgency bonus is `urgency`.
    pub fn edge_cost(&self, distance_km: f64, urgency: f64) -> f64 {
        distance_km * self.distance_weight - urgency
    }

    /// Cost of the final leg back to the depot; earns no bonus.
    pub fn return_cost(&self, distance_km: f64) -> f64 {
        distance_km * self.distance_weight
    }

    /// Penalty for reaching `bin` `arrival_min` minutes into the route.
    pub fn deadline_risk(&self, bin: &Bin, arrival_min: f64) -> f64 {
        let fill = f64::from(bin.fill_level.min(100)) / 100.0;
        self.deadline_risk_weight * fill * (arrival_min / 60.0)
    }

    /// Returns `true` if the bin meets the configured collection threshold.
    pub fn is_due(&self, bin: &Bin) -> bool {
        is_due(bin, self.collection_threshold_pct)
    }

    /// The configured due threshold.
    pub fn collection_threshold_pct(&self) -> u8 {
        self.collection_threshold_pct
    }
}

/// Returns `true` if `bin.fill_level >= threshold_pct`.
pub fn is_due(bin: &Bin, threshold_pct: u8) -> bool {
    bin.is_due(threshold_pct)
}
