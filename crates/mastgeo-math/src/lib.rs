#![warn(missing_docs)]

//! Math types for mastgeo.
//!
//! Thin wrappers around nalgebra providing the types used to describe
//! where antennas and pipes sit in a model: points, vectors, directions,
//! poses (origin + basis frame), line segments and tolerance constants.
//!
//! Unlike nalgebra's own `normalize`, the helpers here refuse to
//! normalize near-zero vectors and report [`DegenerateVector`] instead.

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Vectors shorter than this cannot be normalized.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// World up, `(0, 0, 1)`.
pub fn world_up() -> Vec3 {
    Vec3::z()
}

/// A vector was too short to give a direction.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("vector length {length:e} is below {epsilon:e}")]
pub struct DegenerateVector {
    /// Length of the offending vector.
    pub length: f64,
    /// Threshold it was compared against.
    pub epsilon: f64,
}

/// Normalize `v`, failing when its length is below [`DEGENERATE_EPSILON`].
pub fn normalize(v: &Vec3) -> Result<Dir3, DegenerateVector> {
    let length = v.norm();
    if length.is_nan() || length < DEGENERATE_EPSILON {
        return Err(DegenerateVector {
            length,
            epsilon: DEGENERATE_EPSILON,
        });
    }
    Ok(Dir3::new_unchecked(v / length))
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// The dot product of the normalized inputs is clamped to `[-1, 1]` so
/// that floating-point overshoot never reaches `acos` as an invalid value.
pub fn angle_between(a: &Vec3, b: &Vec3) -> Result<f64, DegenerateVector> {
    let a = normalize(a)?;
    let b = normalize(b)?;
    Ok(a.dot(b.as_ref()).clamp(-1.0, 1.0).acos())
}

/// Move `point` by `distance` along `direction`.
///
/// `direction` is used as given; pass a unit vector for `distance` to be
/// a true length.
pub fn move_along(point: &Point3, direction: &Vec3, distance: f64) -> Point3 {
    point + direction * distance
}

/// Unit direction pointing from `from` to `to`.
pub fn direction_to(from: &Point3, to: &Point3) -> Result<Dir3, DegenerateVector> {
    normalize(&(to - from))
}

/// Absolute distance between two points measured along `direction`.
pub fn distance_along(from: &Point3, to: &Point3, direction: &Vec3) -> f64 {
    (to - from).dot(direction).abs()
}

/// A bounded line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
}

impl Segment {
    /// Segment starting at `origin` and running `length` along `direction`.
    pub fn along(origin: &Point3, direction: &Vec3, length: f64) -> Result<Self, DegenerateVector> {
        let dir = normalize(direction)?;
        Ok(Self {
            start: *origin,
            end: move_along(origin, dir.as_ref(), length),
        })
    }

    /// Segment centered on `origin`, running `length` both ways along `direction`.
    pub fn through(origin: &Point3, direction: &Vec3, length: f64) -> Result<Self, DegenerateVector> {
        let dir = normalize(direction)?;
        Ok(Self {
            start: move_along(origin, dir.as_ref(), -length),
            end: move_along(origin, dir.as_ref(), length),
        })
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Placement of a fixture: an origin plus three world-space basis vectors.
///
/// `basis_x` is the lateral axis, `basis_y` the facing (forward) axis and
/// `basis_z` the fixture's own vertical. The basis is expected to be
/// orthonormal; nothing here enforces it, see [`Pose::is_orthonormal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Origin in world coordinates.
    pub origin: Point3,
    /// Lateral basis vector.
    pub basis_x: Vec3,
    /// Facing basis vector.
    pub basis_y: Vec3,
    /// Vertical basis vector.
    pub basis_z: Vec3,
}

impl Pose {
    /// Create a pose from an origin and explicit basis vectors.
    pub fn new(origin: Point3, basis_x: Vec3, basis_y: Vec3, basis_z: Vec3) -> Self {
        Self {
            origin,
            basis_x,
            basis_y,
            basis_z,
        }
    }

    /// World-aligned pose at `origin`.
    pub fn at(origin: Point3) -> Self {
        Self::new(origin, Vec3::x(), Vec3::y(), Vec3::z())
    }

    /// Pose at `origin` whose basis is the columns of `rotation`.
    pub fn from_rotation(origin: Point3, rotation: &Rotation3<f64>) -> Self {
        let m = rotation.matrix();
        Self::new(
            origin,
            m.column(0).into_owned(),
            m.column(1).into_owned(),
            m.column(2).into_owned(),
        )
    }

    /// Lateral axis (`basis_x`).
    pub fn lateral(&self) -> &Vec3 {
        &self.basis_x
    }

    /// Facing axis (`basis_y`).
    pub fn facing(&self) -> &Vec3 {
        &self.basis_y
    }

    /// The fixture's own vertical (`basis_z`).
    pub fn vertical(&self) -> &Vec3 {
        &self.basis_z
    }

    /// Express a local direction in world coordinates.
    pub fn local_to_world_vec(&self, local: &Vec3) -> Vec3 {
        self.basis_x * local.x + self.basis_y * local.y + self.basis_z * local.z
    }

    /// Express a local point in world coordinates.
    pub fn local_to_world_point(&self, local: &Point3) -> Point3 {
        self.origin + self.local_to_world_vec(&local.coords)
    }

    /// Whether the basis vectors are unit length and pairwise orthogonal.
    pub fn is_orthonormal(&self, tol: &Tolerance) -> bool {
        let axes = [self.basis_x, self.basis_y, self.basis_z];
        axes.iter().all(|a| tol.is_zero(a.norm() - 1.0))
            && tol.is_zero(self.basis_x.dot(&self.basis_y))
            && tol.is_zero(self.basis_y.dot(&self.basis_z))
            && tol.is_zero(self.basis_z.dot(&self.basis_x))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Point3::origin())
    }
}

/// Linear tolerance for pose sanity checks.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear tolerance in model length units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6).
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if a scalar is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
