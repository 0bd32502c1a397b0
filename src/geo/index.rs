//! Index of bins and vehicle depots over one distance matrix.

use crate::error::GeoError;
use crate::models::{Bin, Vehicle};

use super::{DistanceMatrix, GeoPoint};

/// Precomputed distances between bins and depots for one optimization run.
///
/// Layout: bin `i` sits at matrix row `i`; vehicle `v` has its start depot at
/// `n + 2v` and its end depot at `n + 2v + 1`, where `n` is the bin count.
///
/// # Examples
///
/// ```
/// use waste_routing::geo::{GeoIndex, GeoPoint};
/// use waste_routing::models::{Bin, Vehicle};
///
/// let bins = vec![Bin::new("B1", GeoPoint::new(17.39, 78.49), 90)];
/// let fleet = vec![Vehicle::new("T1", 5, GeoPoint::new(17.385, 78.486))];
/// let index = GeoIndex::build(&bins, &fleet, 1.0).unwrap();
/// assert!(index.depot_to_bin(0, 0) > 0.0);
/// assert_eq!(index.depot_to_bin(0, 0), index.bin_to_depot(0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct GeoIndex {
    matrix: DistanceMatrix,
    num_bins: usize,
}

impl GeoIndex {
    /// Builds the index for the given bins and fleet.
    pub fn build(bins: &[Bin], vehicles: &[Vehicle], detour_factor: f64) -> Result<Self, GeoError> {
        let mut points: Vec<GeoPoint> = Vec::with_capacity(bins.len() + 2 * vehicles.len());
        points.extend(bins.iter().map(|b| b.location));
        for vehicle in vehicles {
            points.push(vehicle.start);
            points.push(vehicle.end_depot());
        }
        let matrix = DistanceMatrix::build(&points, detour_factor)?;
        Ok(Self {
            matrix,
            num_bins: bins.len(),
        })
    }

    /// Number of bins indexed.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Distance between two bins.
    pub fn bin_to_bin(&self, a: usize, b: usize) -> f64 {
        self.matrix.get(a, b)
    }

    /// Distance from vehicle `v`'s start depot to bin `b`.
    pub fn depot_to_bin(&self, v: usize, b: usize) -> f64 {
        self.matrix.get(self.start_row(v), b)
    }

    /// Distance from bin `b` to vehicle `v`'s end depot.
    pub fn bin_to_depot(&self, b: usize, v: usize) -> f64 {
        self.matrix.get(b, self.end_row(v))
    }

    fn start_row(&self, v: usize) -> usize {
        self.num_bins + 2 * v
    }

    fn end_row(&self, v: usize) -> usize {
        self.num_bins + 2 * v + 1
    }
}
