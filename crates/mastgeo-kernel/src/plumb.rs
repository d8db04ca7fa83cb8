//! Signed tilt of a fixture's lateral axis out of the horizontal plane.

use mastgeo_math::{angle_between, world_up, Pose, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Tilt of one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumbAngle {
    /// Angle between the lateral axis and its horizontal projection, in
    /// degrees. Negative when the axis rises above horizontal.
    pub degrees: f64,
    /// `up · lateral`, whose sign picks the sign of `degrees`.
    pub dot: f64,
}

/// Compute the plumb angle of `pose`.
///
/// The lateral axis is compared with its projection onto the XY plane.
/// Fails with [`GeometryError::DegenerateVector`] when the lateral axis is
/// vertical (its projection vanishes) or zero.
pub fn plumb_angle(pose: &Pose) -> Result<PlumbAngle> {
    let lateral = pose.lateral();
    let horizontal = Vec3::new(lateral.x, lateral.y, 0.0);

    let angle = angle_between(lateral, &horizontal)
        .map_err(|e| GeometryError::degenerate("lateral axis projected onto XY", e))?;
    let dot = world_up().dot(lateral);

    let mut degrees = angle.to_degrees();
    if dot > 0.0 {
        degrees = -degrees;
    }
    Ok(PlumbAngle { degrees, dot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mastgeo_math::Point3;
    use nalgebra::Rotation3;

    fn pose_with_lateral(lateral: Vec3) -> Pose {
        Pose::new(Point3::origin(), lateral, Vec3::y(), Vec3::z())
    }

    #[test]
    fn test_forty_five_degrees() {
        let lateral = Vec3::new(1.0, 0.0, 1.0) / 2f64.sqrt();
        let plumb = plumb_angle(&pose_with_lateral(lateral)).unwrap();
        assert_relative_eq!(plumb.degrees.abs(), 45.0, epsilon = 1e-6);
        assert_relative_eq!(plumb.degrees, -45.0, epsilon = 1e-6);
        assert!(plumb.dot > 0.0);
    }

    #[test]
    fn test_leaning_down_is_positive() {
        let lateral = Vec3::new(1.0, 0.0, -1.0) / 2f64.sqrt();
        let plumb = plumb_angle(&pose_with_lateral(lateral)).unwrap();
        assert_relative_eq!(plumb.degrees, 45.0, epsilon = 1e-6);
        assert!(plumb.dot < 0.0);
    }

    #[test]
    fn test_level_fixture_is_zero() {
        let rot = Rotation3::from_axis_angle(&Vec3::z_axis(), 1.2);
        let plumb = plumb_angle(&Pose::from_rotation(Point3::new(5.0, 5.0, 30.0), &rot)).unwrap();
        assert_relative_eq!(plumb.degrees, 0.0, epsilon = 1e-6);
        assert!(plumb.dot.abs() < 1e-12);
    }

    #[test]
    fn test_small_tilt_about_facing_axis() {
        let rot = Rotation3::from_axis_angle(&Vec3::y_axis(), 3f64.to_radians());
        let plumb = plumb_angle(&Pose::from_rotation(Point3::origin(), &rot)).unwrap();
        // Rotating about +Y by a positive angle tips +X downward.
        assert_relative_eq!(plumb.degrees, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_lateral_axis_is_degenerate() {
        let err = plumb_angle(&pose_with_lateral(Vec3::z())).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
        assert!(plumb_angle(&pose_with_lateral(Vec3::zeros())).is_err());
    }
}
