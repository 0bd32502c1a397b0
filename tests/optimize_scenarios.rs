//! End-to-end scenarios for the `optimize` entry point.

use chrono::{Duration, TimeZone, Utc};
use waste_routing::config::OptimizerConfig;
use waste_routing::error::OptimizeError;
use waste_routing::evaluation::evaluate_route;
use waste_routing::geo::GeoPoint;
use waste_routing::models::{Bin, BinId, UnassignedReason, Vehicle, VehicleId};
use waste_routing::optimizer::optimize;

fn config() -> OptimizerConfig {
    OptimizerConfig::default()
        .with_reference_time(Utc.with_ymd_and_hms(2025, 11, 13, 8, 0, 0).unwrap())
}

fn depot() -> GeoPoint {
    GeoPoint::new(17.385, 78.486)
}

fn bin_at(id: &str, i: usize, fill: u8) -> Bin {
    let lat = 17.380 + 0.003 * (i % 5) as f64;
    let lng = 78.480 + 0.004 * (i / 5) as f64;
    Bin::new(id, GeoPoint::new(lat, lng), fill)
}

#[test]
fn zero_bins_one_vehicle_gives_one_empty_route() {
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&[], &fleet, &config()).expect("valid request");

    assert_eq!(result.plan.num_routes(), 1);
    let route = result.plan.route(&VehicleId::from("T1")).expect("route for T1");
    assert!(route.is_empty());
    assert_eq!(route.total_distance_km(), 0.0);
    assert!(result.unassigned.is_empty());
    assert_eq!(result.metrics.fuel_saved_estimate_pct, 0.0);
}

#[test]
fn three_full_bins_fit_one_vehicle() {
    let bins = vec![
        bin_at("BIN001", 0, 95),
        bin_at("BIN002", 1, 95),
        bin_at("BIN003", 2, 95),
    ];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");

    let route = result.plan.route(&VehicleId::from("T1")).expect("route for T1");
    assert_eq!(route.len(), 3);
    assert!(result.unassigned.is_empty());
    assert_eq!(result.metrics.bins_to_collect, 3);
}

#[test]
fn over_capacity_routes_highest_priority_and_reports_rest() {
    // Fill levels 81, 83, ..., 99: the four fullest are BIN006..BIN009.
    let bins: Vec<Bin> = (0..10)
        .map(|i| bin_at(&format!("BIN{i:03}"), i, 81 + 2 * i as u8))
        .collect();
    let fleet = vec![Vehicle::new("T1", 4, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");

    let route = result.plan.route(&VehicleId::from("T1")).expect("route for T1");
    assert_eq!(route.len(), 4);
    let mut routed: Vec<&str> = route.bin_ids().iter().map(|id| id.0.as_str()).collect();
    routed.sort_unstable();
    assert_eq!(routed, vec!["BIN006", "BIN007", "BIN008", "BIN009"]);

    assert_eq!(result.unassigned.len(), 6);
    assert!(result
        .unassigned
        .iter()
        .all(|u| u.reason == UnassignedReason::CapacityExceeded));
}

#[test]
fn invalid_coordinate_is_excluded_and_rest_routed() {
    let bins = vec![
        bin_at("BIN001", 0, 90),
        Bin::new("BIN002", GeoPoint::new(200.0, 78.49), 90),
        bin_at("BIN003", 2, 90),
    ];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");

    assert_eq!(result.plan.num_served(), 2);
    assert_eq!(result.unassigned.len(), 1);
    assert_eq!(result.unassigned[0].bin_id, BinId::from("BIN002"));
    assert_eq!(result.unassigned[0].reason, UnassignedReason::InvalidCoordinate);
}

#[test]
fn empty_fleet_with_due_bins_fails() {
    let bins = vec![bin_at("BIN001", 0, 90)];
    let err = optimize(&bins, &[], &config()).expect_err("no capacity");
    assert!(matches!(err, OptimizeError::NoCapacityAvailable { due_bins: 1 }));
}

#[test]
fn empty_fleet_without_due_bins_succeeds() {
    let bins = vec![bin_at("BIN001", 0, 30)];
    let result = optimize(&bins, &[], &config()).expect("nothing to collect");
    assert_eq!(result.plan.num_routes(), 0);
    assert!(result.unassigned.is_empty());
}

#[test]
fn non_due_bins_are_neither_routed_nor_reported() {
    let bins = vec![bin_at("BIN001", 0, 90), bin_at("BIN002", 1, 40)];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");
    assert_eq!(result.plan.num_served(), 1);
    assert!(result.unassigned.is_empty());
}

#[test]
fn threshold_is_configurable() {
    let bins = vec![bin_at("BIN001", 0, 60), bin_at("BIN002", 1, 40)];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config().with_collection_threshold_pct(50))
        .expect("valid request");
    assert_eq!(result.plan.num_served(), 1);
}

#[test]
fn stale_bin_wins_the_last_slot() {
    let now = Utc.with_ymd_and_hms(2025, 11, 13, 8, 0, 0).unwrap();
    let bins = vec![
        bin_at("BIN001", 0, 90).with_last_collected_at(now - Duration::hours(4)),
        bin_at("BIN002", 1, 85).with_last_collected_at(now - Duration::days(9)),
    ];
    let fleet = vec![Vehicle::new("T1", 1, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");
    let route = result.plan.route(&VehicleId::from("T1")).expect("route for T1");
    assert_eq!(route.bin_ids(), vec![&BinId::from("BIN002")]);
    assert_eq!(result.unassigned[0].bin_id, BinId::from("BIN001"));
}

#[test]
fn duplicate_bin_ids_are_reported() {
    let bins = vec![bin_at("BIN001", 0, 90), bin_at("BIN001", 3, 95)];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");
    assert_eq!(result.plan.num_served(), 1);
    assert_eq!(result.unassigned[0].reason, UnassignedReason::DuplicateId);
}

#[test]
fn zero_load_bin_is_reported() {
    let bins = vec![bin_at("BIN001", 0, 90), bin_at("BIN002", 1, 90).with_load(0)];
    let fleet = vec![Vehicle::new("T1", 1, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");
    assert_eq!(result.plan.num_served(), 1);
    assert_eq!(result.unassigned[0].bin_id, BinId::from("BIN002"));
    assert_eq!(result.unassigned[0].reason, UnassignedReason::InvalidLoad);
}

#[test]
fn reported_metrics_match_external_evaluation() {
    let bins: Vec<Bin> = (0..6).map(|i| bin_at(&format!("BIN{i:03}"), i, 90)).collect();
    let truck = Vehicle::new("T1", 10, depot());
    let cfg = config();
    let result = optimize(&bins, std::slice::from_ref(&truck), &cfg).expect("valid request");
    let route = result.plan.route(&truck.id).expect("route for T1");

    let ordered: Vec<Bin> = route
        .bin_ids()
        .iter()
        .map(|id| {
            bins.iter()
                .find(|b| &&b.id == id)
                .cloned()
                .expect("routed bin comes from input")
        })
        .collect();
    let eval = evaluate_route(&ordered, &truck, &cfg).expect("valid coordinates");

    assert!((eval.distance_km - route.total_distance_km()).abs() < 1e-9);
    assert!((eval.time_min - route.total_time_min()).abs() < 1e-9);
    assert!((eval.cost - route.cost()).abs() < 1e-9);
    assert!(eval.feasible);
}

#[test]
fn separate_end_depot_is_honoured() {
    let bins = vec![bin_at("BIN001", 0, 90)];
    let end = GeoPoint::new(17.45, 78.55);
    let fleet = vec![Vehicle::new("T1", 5, depot()).with_end(end)];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");

    let home = optimize(&bins, &[Vehicle::new("T1", 5, depot())], &config()).expect("valid");
    assert!(result.metrics.total_distance_km > home.metrics.total_distance_km);
}

#[test]
fn output_serializes_to_json() {
    let bins = vec![bin_at("BIN001", 0, 90), Bin::new("BIN002", GeoPoint::new(0.0, 999.0), 90)];
    let fleet = vec![Vehicle::new("T1", 5, depot())];
    let result = optimize(&bins, &fleet, &config()).expect("valid request");
    let json = serde_json::to_value(&result).expect("serializable");

    assert!(json["plan"]["routes"]["T1"]["visits"].is_array());
    assert_eq!(json["unassigned"][0]["reason"], "InvalidCoordinate");
    assert!(json["metrics"]["totalTimeMin"].is_number());
}
