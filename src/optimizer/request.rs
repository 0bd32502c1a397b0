//! Request validation and priority selection.

use std::collections::HashSet;

use crate::cost::CostModel;
use crate::error::OptimizeError;
use crate::models::{Bin, UnassignedBin, UnassignedReason, Vehicle};

/// Validated request data for one run.
#[derive(Debug, Clone)]
pub(crate) struct Instance {
    /// Valid due bins, ascending by id. Search state indexes into this.
    pub bins: Vec<Bin>,
    /// Fleet, ascending by id.
    pub vehicles: Vec<Vehicle>,
    /// Bins rejected for bad data.
    pub rejected: Vec<UnassignedBin>,
}

/// Validates the fleet and filters bins down to valid due ones.
///
/// Bad bins are reported, not fatal. An unusable vehicle, or due bins with no
/// fleet at all, fails the whole request.
pub(crate) fn prepare(
    bins: &[Bin],
    vehicles: &[Vehicle],
    cost: &CostModel,
) -> Result<Instance, OptimizeError> {
    let vehicles = validate_fleet(vehicles)?;

    let mut sorted: Vec<&Bin> = bins.iter().collect();
    // Stable: among duplicates, the first occurrence in the request wins.
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut due = Vec::new();
    let mut rejected = Vec::new();
    let mut previous: Option<&Bin> = None;

    for bin in sorted {
        let reason = if previous.is_some_and(|p| p.id == bin.id) {
            Some(UnassignedReason::DuplicateId)
        } else if !bin.location.is_valid() {
            Some(UnassignedReason::InvalidCoordinate)
        } else if !bin.has_valid_fill_level() {
            Some(UnassignedReason::InvalidFillLevel)
        } else if !bin.has_valid_load() {
            Some(UnassignedReason::InvalidLoad)
        } else {
            None
        };
        previous = Some(bin);

        match reason {
            Some(reason) => rejected.push(UnassignedBin {
                bin_id: bin.id.clone(),
                reason,
            }),
            None if cost.is_due(bin) => due.push(bin.clone()),
            None => {}
        }
    }

    if vehicles.is_empty() && !due.is_empty() {
        return Err(OptimizeError::NoCapacityAvailable {
            due_bins: due.len(),
        });
    }

    Ok(Instance {
        bins: due,
        vehicles,
        rejected,
    })
}

fn validate_fleet(vehicles: &[Vehicle]) -> Result<Vec<Vehicle>, OptimizeError> {
    let mut seen = HashSet::new();
    for vehicle in vehicles {
        let invalid = |reason: &str| OptimizeError::InvalidVehicle {
            id: vehicle.id.clone(),
            reason: reason.to_owned(),
        };
        if vehicle.capacity == 0 {
            return Err(invalid("capacity must be positive"));
        }
        if !vehicle.start.is_valid() || !vehicle.end_depot().is_valid() {
            return Err(invalid("depot coordinate out of range"));
        }
        if !seen.insert(&vehicle.id) {
            return Err(invalid("duplicate vehicle id"));
        }
    }
    let mut fleet = vehicles.to_vec();
    fleet.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(fleet)
}

/// Due bins split into per-vehicle buckets by [`select_by_priority`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    /// Bins reserved for each vehicle, ascending by index. Each bucket fits
    /// its vehicle's capacity.
    pub buckets: Vec<Vec<usize>>,
    /// Bins that fit no vehicle, ascending by index.
    pub rejected: Vec<usize>,
}

/// Picks which due bins the fleet can take, most urgent first.
///
/// Bins are ranked by priority weight descending, then index ascending. Each
/// goes to the vehicle with the most remaining capacity that still fits it;
/// bins that fit nowhere are rejected. A rejected bin is heavier than every
/// lower-ranked bin that was placed.
pub(crate) fn select_by_priority(bins: &[Bin], vehicles: &[Vehicle], cost: &CostModel) -> Selection {
    let priorities: Vec<f64> = bins.iter().map(|b| cost.priority_weight(b)).collect();
    let mut order: Vec<usize> = (0..bins.len()).collect();
    order.sort_by(|&a, &b| priorities[b].total_cmp(&priorities[a]).then(a.cmp(&b)));

    let mut remaining: Vec<u32> = vehicles.iter().map(|v| v.capacity).collect();
    let mut buckets = vec![Vec::new(); vehicles.len()];
    let mut rejected = Vec::new();

    for b in order {
        let load = bins[b].load;
        let roomiest = remaining
            .iter()
            .enumerate()
            .filter(|(_, &room)| room >= load)
            .fold(None, |best: Option<(usize, u32)>, (v, &room)| match best {
                Some((_, best_room)) if best_room >= room => best,
                _ => Some((v, room)),
            });
        match roomiest {
            Some((v, _)) => {
                remaining[v] -= load;
                buckets[v].push(b);
            }
            None => rejected.push(b),
        }
    }

    for bucket in &mut buckets {
        bucket.sort_unstable();
    }
    rejected.sort_unstable();
    Selection { buckets, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizerConfig;
    use crate::geo::GeoPoint;
    use chrono::{Duration, TimeZone, Utc};

    fn cost() -> CostModel {
        CostModel::from_config(
            &OptimizerConfig::default(),
            Utc.with_ymd_and_hms(2025, 11, 13, 8, 0, 0).unwrap(),
        )
    }

    fn depot() -> GeoPoint {
        GeoPoint::new(17.385, 78.486)
    }

    fn bin(id: &str, fill: u8) -> Bin {
        Bin::new(id, GeoPoint::new(17.39, 78.49), fill)
    }

    #[test]
    fn test_filters_and_sorts() {
        let bins = vec![bin("B3", 90), bin("B1", 85), bin("B2", 10)];
        let fleet = vec![Vehicle::new("T1", 5, depot())];
        let inst = prepare(&bins, &fleet, &cost()).expect("valid");
        let ids: Vec<&str> = inst.bins.iter().map(|b| b.id.0.as_str()).collect();
        assert_eq!(ids, vec!["B1", "B3"]);
        assert!(inst.rejected.is_empty());
    }

    #[test]
    fn test_reports_bad_bins() {
        let bins = vec![
            Bin::new("B1", GeoPoint::new(200.0, 78.49), 90),
            bin("B2", 101),
            bin("B3", 90),
            bin("B3", 95),
            bin("B4", 90).with_load(0),
        ];
        let fleet = vec![Vehicle::new("T1", 5, depot())];
        let inst = prepare(&bins, &fleet, &cost()).expect("valid");
        assert_eq!(inst.bins.len(), 1);
        assert_eq!(inst.bins[0].fill_level, 90);
        let reasons: Vec<UnassignedReason> = inst.rejected.iter().map(|u| u.reason).collect();
        assert_eq!(
            reasons,
            vec![
                UnassignedReason::InvalidCoordinate,
                UnassignedReason::InvalidFillLevel,
                UnassignedReason::DuplicateId,
                UnassignedReason::InvalidLoad,
            ]
        );
    }

    #[test]
    fn test_invalid_bin_reported_even_if_not_due() {
        let bins = vec![Bin::new("B1", GeoPoint::new(0.0, 190.0), 10)];
        let inst = prepare(&bins, &[], &cost()).expect("valid");
        assert_eq!(inst.rejected.len(), 1);
        assert!(inst.bins.is_empty());
    }

    #[test]
    fn test_empty_fleet_with_due_bins() {
        let err = prepare(&[bin("B1", 90)], &[], &cost()).expect_err("should fail");
        assert!(matches!(err, OptimizeError::NoCapacityAvailable { due_bins: 1 }));
    }

    #[test]
    fn test_empty_fleet_without_due_bins() {
        let inst = prepare(&[bin("B1", 20)], &[], &cost()).expect("valid");
        assert!(inst.bins.is_empty());
        assert!(inst.vehicles.is_empty());
    }

    #[test]
    fn test_invalid_vehicles() {
        let zero = vec![Vehicle::new("T1", 0, depot())];
        assert!(matches!(
            prepare(&[], &zero, &cost()),
            Err(OptimizeError::InvalidVehicle { .. })
        ));
        let bad_depot = vec![Vehicle::new("T1", 3, depot()).with_end(GeoPoint::new(0.0, 181.0))];
        assert!(matches!(
            prepare(&[], &bad_depot, &cost()),
            Err(OptimizeError::InvalidVehicle { .. })
        ));
        let dup = vec![Vehicle::new("T1", 3, depot()), Vehicle::new("T1", 4, depot())];
        assert!(matches!(
            prepare(&[], &dup, &cost()),
            Err(OptimizeError::InvalidVehicle { .. })
        ));
    }

    #[test]
    fn test_fleet_sorted_by_id() {
        let fleet = vec![Vehicle::new("T2", 3, depot()), Vehicle::new("T1", 3, depot())];
        let inst = prepare(&[], &fleet, &cost()).expect("valid");
        assert_eq!(inst.vehicles[0].id.0, "T1");
    }

    #[test]
    fn test_select_by_priority_unit_loads() {
        let bins: Vec<Bin> = (0..6u8).map(|i| bin(&format!("B{i}"), 80 + i * 3)).collect();
        let fleet = vec![Vehicle::new("T1", 2, depot()), Vehicle::new("T2", 2, depot())];
        let selection = select_by_priority(&bins, &fleet, &cost());
        // Fullest four: B2..B5, alternating between equally roomy trucks.
        assert_eq!(selection.buckets, vec![vec![3, 5], vec![2, 4]]);
        assert_eq!(selection.rejected, vec![0, 1]);
    }

    #[test]
    fn test_select_by_priority_uses_staleness() {
        let now = Utc.with_ymd_and_hms(2025, 11, 13, 8, 0, 0).unwrap();
        let bins = vec![
            bin("B1", 90).with_last_collected_at(now - Duration::hours(6)),
            bin("B2", 85).with_last_collected_at(now - Duration::days(10)),
        ];
        let fleet = vec![Vehicle::new("T1", 1, depot())];
        let selection = select_by_priority(&bins, &fleet, &cost());
        assert_eq!(selection.buckets, vec![vec![1]]);
        assert_eq!(selection.rejected, vec![0]);
    }

    #[test]
    fn test_select_by_priority_ties_by_index() {
        let bins = vec![bin("B1", 90), bin("B2", 90), bin("B3", 90)];
        let fleet = vec![Vehicle::new("T1", 2, depot())];
        let selection = select_by_priority(&bins, &fleet, &cost());
        assert_eq!(selection.buckets, vec![vec![0, 1]]);
        assert_eq!(selection.rejected, vec![2]);
    }

    #[test]
    fn test_select_by_priority_weighted() {
        let bins = vec![
            bin("B1", 100).with_load(70),
            bin("B2", 95).with_load(50),
            bin("B3", 90).with_load(40),
        ];
        let fleet = vec![Vehicle::new("T1", 100, depot()), Vehicle::new("T2", 60, depot())];
        let selection = select_by_priority(&bins, &fleet, &cost());
        // B1 → T1 (30 left), B2 → T2 (10 left), B3 fits nowhere.
        assert_eq!(selection.buckets, vec![vec![0], vec![1]]);
        assert_eq!(selection.rejected, vec![2]);
    }

    #[test]
    fn test_select_by_priority_skips_heavy_bin() {
        let bins = vec![
            bin("B1", 100).with_load(70),
            bin("B2", 95).with_load(40),
            bin("B3", 90).with_load(40),
            bin("B4", 85).with_load(30),
        ];
        let fleet = vec![Vehicle::new("T1", 100, depot()), Vehicle::new("T2", 60, depot())];
        let selection = select_by_priority(&bins, &fleet, &cost());
        // B1 → T1 (30 left), B2 → T2 (20 left), B3 fits nowhere, B4 → T1.
        assert_eq!(selection.buckets, vec![vec![0, 3], vec![1]]);
        assert_eq!(selection.rejected, vec![2]);
    }
}
