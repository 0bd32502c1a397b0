//! Dense distance matrix.

use crate::error::GeoError;

use super::point::{haversine_unchecked, GeoPoint};

/// A dense n×n matrix of road-distance estimates in kilometers, row-major.
///
/// Every unordered pair is computed once and mirrored, so the matrix is
/// exactly symmetric with a zero diagonal.
///
/// # Examples
///
/// ```
/// use waste_routing::geo::{DistanceMatrix, GeoPoint};
///
/// let points = [
///     GeoPoint::new(17.385, 78.486),
///     GeoPoint::new(17.390, 78.490),
/// ];
/// let dm = DistanceMatrix::build(&points, 1.0).unwrap();
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.get(0, 1), dm.get(1, 0));
/// assert_eq!(dm.get(0, 0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes all pairwise haversine distances, scaled by `detour_factor`.
    ///
    /// Fails on the first point with an out-of-range coordinate.
    pub fn build(points: &[GeoPoint], detour_factor: f64) -> Result<Self, GeoError> {
        for point in points {
            point.validate()?;
        }
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_unchecked(points[i], points[j]) * detour_factor;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
