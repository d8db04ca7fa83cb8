//! Principal axis of a point cluster by power iteration.
//!
//! The scatter matrix `S = Σ (pᵢ − c)(pᵢ − c)ᵀ` of the cluster about its
//! centroid `c` is symmetric positive semi-definite; its dominant
//! eigenvector is the direction of the total-least-squares line through
//! the cluster. Power iteration approximates it by repeatedly applying `S`
//! to a seed vector and renormalizing.
//!
//! The iteration count is fixed. There is no convergence test, so the same
//! input always gives bit-identical output.
//!
//! The returned axis has no canonical sign: `a` and `-a` are equally valid.
//! Use [`AxisEstimate::oriented_toward`] when a caller needs a stable sign.

use mastgeo_math::{normalize, Dir3, Point3, Vec3};
use nalgebra::Matrix3;
use tracing::trace;

use crate::centroid::centroid;
use crate::error::{GeometryError, Result};

/// Default number of power iterations.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Default (unnormalized) seed vector, `(1, 1, 1)`.
pub const DEFAULT_SEED: [f64; 3] = [1.0, 1.0, 1.0];

/// Symmetric 3×3 scatter matrix, stored as its six independent entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScatterMatrix {
    /// Σ dx·dx
    pub xx: f64,
    /// Σ dx·dy
    pub xy: f64,
    /// Σ dx·dz
    pub xz: f64,
    /// Σ dy·dy
    pub yy: f64,
    /// Σ dy·dz
    pub yz: f64,
    /// Σ dz·dz
    pub zz: f64,
}

impl ScatterMatrix {
    /// Accumulate the scatter of `points` about `center`.
    pub fn from_points(points: &[Point3], center: &Point3) -> Self {
        let mut s = Self::default();
        for p in points {
            let d = p - center;
            s.xx += d.x * d.x;
            s.xy += d.x * d.y;
            s.xz += d.x * d.z;
            s.yy += d.y * d.y;
            s.yz += d.y * d.z;
            s.zz += d.z * d.z;
        }
        s
    }

    /// `S · v`.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        Vec3::new(
            self.xx * v.x + self.xy * v.y + self.xz * v.z,
            self.xy * v.x + self.yy * v.y + self.yz * v.z,
            self.xz * v.x + self.yz * v.y + self.zz * v.z,
        )
    }

    /// Full matrix form.
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.xx, self.xy, self.xz, //
            self.xy, self.yy, self.yz, //
            self.xz, self.yz, self.zz,
        )
    }

    /// Trace of the matrix (total squared spread of the cluster).
    pub fn trace(&self) -> f64 {
        self.xx + self.yy + self.zz
    }
}

/// Outcome of [`estimate_axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEstimate {
    /// Estimated principal direction (sign arbitrary).
    pub axis: Dir3,
    /// Mean of the input points.
    pub centroid: Point3,
    /// Set when iteration could not proceed because `S · b` vanished
    /// (coincident points, or a seed orthogonal to the spread). The axis
    /// is then the last iterate, which is the normalized seed when it
    /// happens on the first step.
    pub degenerate: bool,
}

impl AxisEstimate {
    /// The axis flipped, if needed, to have a non-negative dot product
    /// with `reference`.
    pub fn oriented_toward(&self, reference: &Vec3) -> Dir3 {
        if self.axis.dot(reference) < 0.0 {
            -self.axis
        } else {
            self.axis
        }
    }
}

/// Estimate the principal axis of `points`.
///
/// Fails with [`GeometryError::EmptyInput`] for no points,
/// [`GeometryError::InsufficientPoints`] for one point and
/// [`GeometryError::DegenerateVector`] for a zero seed.
pub fn estimate_axis(points: &[Point3], iterations: usize, seed: &Vec3) -> Result<AxisEstimate> {
    let center = centroid(points)?;
    if points.len() < 2 {
        return Err(GeometryError::InsufficientPoints { got: points.len() });
    }
    let mut b = normalize(seed).map_err(|e| GeometryError::degenerate("power iteration seed", e))?;

    let scatter = ScatterMatrix::from_points(points, &center);
    for step in 0..iterations {
        match normalize(&scatter.apply(b.as_ref())) {
            Ok(next) => b = next,
            Err(_) => {
                trace!(step, "scatter product vanished, keeping current iterate");
                return Ok(AxisEstimate {
                    axis: b,
                    centroid: center,
                    degenerate: true,
                });
            }
        }
    }

    Ok(AxisEstimate {
        axis: b,
        centroid: center,
        degenerate: false,
    })
}

/// [`estimate_axis`] with the default iteration count and seed.
pub fn principal_axis(points: &[Point3]) -> Result<AxisEstimate> {
    estimate_axis(points, DEFAULT_ITERATIONS, &Vec3::from(DEFAULT_SEED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn angle_to_line_deg(axis: &Dir3, d: &Vec3) -> f64 {
        let d = d.normalize();
        axis.dot(&d).abs().clamp(-1.0, 1.0).acos().to_degrees()
    }

    fn scattered_line() -> Vec<Point3> {
        // Roughly along (2, 1, 0) with small off-axis noise.
        vec![
            Point3::new(0.0, 0.0, 0.1),
            Point3::new(2.0, 1.1, -0.1),
            Point3::new(4.0, 1.9, 0.0),
            Point3::new(6.0, 3.05, 0.05),
            Point3::new(8.0, 4.0, -0.05),
        ]
    }

    #[test]
    fn test_collinear_points_converge_to_line() {
        let d = Vec3::new(1.0, -2.0, 0.5);
        let base = Point3::new(3.0, 3.0, 3.0);
        let points: Vec<Point3> = [-2.0, -1.0, 0.5, 1.0, 4.0]
            .iter()
            .map(|t| base + d * *t)
            .collect();
        let est = principal_axis(&points).unwrap();
        assert!(!est.degenerate);
        assert!(angle_to_line_deg(&est.axis, &d) < 1.0);
    }

    #[test]
    fn test_result_is_unit_length() {
        let est = principal_axis(&scattered_line()).unwrap();
        assert_relative_eq!(est.axis.norm(), 1.0, epsilon = 1e-12);
        assert!(angle_to_line_deg(&est.axis, &Vec3::new(2.0, 1.0, 0.0)) < 2.0);
    }

    #[test]
    fn test_scale_invariance() {
        let points = scattered_line();
        let est = principal_axis(&points).unwrap();
        let c = est.centroid;
        for k in [0.01, 3.0, 250.0] {
            let scaled: Vec<Point3> = points.iter().map(|p| c + (p - c) * k).collect();
            let other = principal_axis(&scaled).unwrap();
            assert_relative_eq!(other.axis.dot(est.axis.as_ref()).abs(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_repeated_point_returns_seed() {
        let p = Point3::new(4.0, -1.0, 2.0);
        let est = principal_axis(&[p, p, p]).unwrap();
        assert!(est.degenerate);
        let seed = Vec3::from(DEFAULT_SEED).normalize();
        assert_eq!(est.axis.into_inner(), seed);
    }

    #[test]
    fn test_seed_orthogonal_to_spread_is_degenerate() {
        // S = d dᵀ with d ⟂ (1, 1, 1): the first product is the zero vector.
        let points = vec![Point3::new(1.0, -1.0, 0.0), Point3::new(-1.0, 1.0, 0.0)];
        let est = principal_axis(&points).unwrap();
        assert!(est.degenerate);

        let est = estimate_axis(&points, DEFAULT_ITERATIONS, &Vec3::x()).unwrap();
        assert!(!est.degenerate);
        assert!(angle_to_line_deg(&est.axis, &Vec3::new(1.0, -1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn test_insufficient_and_empty() {
        assert!(matches!(
            principal_axis(&[]),
            Err(GeometryError::EmptyInput { .. })
        ));
        assert!(matches!(
            principal_axis(&[Point3::origin()]),
            Err(GeometryError::InsufficientPoints { got: 1 })
        ));
    }

    #[test]
    fn test_zero_seed_rejected() {
        let err = estimate_axis(&scattered_line(), 10, &Vec3::zeros()).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }

    #[test]
    fn test_zero_iterations_returns_normalized_seed() {
        let est = estimate_axis(&scattered_line(), 0, &Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(est.axis.into_inner(), Vec3::z());
        assert!(!est.degenerate);
    }

    #[test]
    fn test_deterministic() {
        let a = principal_axis(&scattered_line()).unwrap();
        let b = principal_axis(&scattered_line()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_oriented_toward() {
        let est = principal_axis(&scattered_line()).unwrap();
        let r = Vec3::new(-1.0, 0.0, 0.0);
        let a = est.oriented_toward(&r);
        assert!(a.dot(&r) >= 0.0);
        assert!(est.oriented_toward(&-r).dot(&-r) >= 0.0);
    }

    #[test]
    fn test_scatter_apply_matches_matrix() {
        let points = scattered_line();
        let c = centroid(&points).unwrap();
        let s = ScatterMatrix::from_points(&points, &c);
        let v = Vec3::new(0.3, -0.7, 1.1);
        assert_relative_eq!(s.apply(&v), s.to_matrix() * v, epsilon = 1e-12);
        assert_relative_eq!(s.to_matrix(), s.to_matrix().transpose());
        assert!(s.trace() > 0.0);
    }
}
