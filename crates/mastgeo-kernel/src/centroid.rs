//! Centroid and axis-aligned bounding box of a point set.
//!
//! The two centers are not interchangeable. Facing classification uses
//! the bounding-box center of all antennas; axis estimation works about
//! the arithmetic mean. For lopsided clusters they differ and so do the
//! labels.

use mastgeo_math::{Point3, Vec3};

use crate::error::{GeometryError, Result};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Tight box around `points`, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut aabb = Self::empty();
        let mut any = false;
        for p in points {
            aabb.include_point(p);
            any = true;
        }
        any.then_some(aabb)
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Per-axis midpoint of min and max.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along each axis.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Arithmetic mean of `points`, coordinate by coordinate.
pub fn centroid(points: &[Point3]) -> Result<Point3> {
    if points.is_empty() {
        return Err(GeometryError::empty("points for centroid"));
    }
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Ok(Point3::from(sum / points.len() as f64))
}

/// Center of the axis-aligned bounding box of `points`.
pub fn bounding_box_center(points: &[Point3]) -> Result<Point3> {
    Aabb3::from_points(points)
        .map(|aabb| aabb.center())
        .ok_or_else(|| GeometryError::empty("points for bounding box"))
}
