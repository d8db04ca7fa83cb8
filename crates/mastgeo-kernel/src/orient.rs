//! Facing (IN/OUT) and side (LEFT/RIGHT) labels from dot-product signs.
//!
//! Both decisions use a strict `> 0` test for the positive label. An exact
//! zero dot product gets the configured tie label, IN and LEFT unless told
//! otherwise.
//!
//! Side labels are only comparable within one pipe's group. Each group has
//! its own principal axis whose sign is arbitrary, so RIGHT next to one pipe
//! says nothing about RIGHT next to another.

use std::fmt;

use mastgeo_math::{normalize, Point3, Pose, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Whether an antenna faces toward or away from the group center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacingLabel {
    /// Facing the center.
    #[default]
    In,
    /// Facing away from the center.
    Out,
}

impl FacingLabel {
    /// Label text as stored by hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// The other label.
    pub fn opposite(&self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

impl fmt::Display for FacingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which side of its pipe an antenna sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SideLabel {
    /// Negative side of the reference axis.
    #[default]
    Left,
    /// Positive side of the reference axis.
    Right,
}

impl SideLabel {
    /// Label text as stored by hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    /// The other label.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A facing label with the dot product that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacingDecision {
    /// The label.
    pub label: FacingLabel,
    /// `facing · (origin − center)`.
    pub dot: f64,
}

/// A side label with the dot product that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideDecision {
    /// The label.
    pub label: SideLabel,
    /// `reference · normalize(origin − anchor)`.
    pub dot: f64,
}

/// Turns dot products into labels using configurable tie labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrientationClassifier {
    /// Label for a facing dot product of exactly zero.
    pub facing_tie: FacingLabel,
    /// Label for a side dot product of exactly zero.
    pub side_tie: SideLabel,
}

impl OrientationClassifier {
    /// Classifier with explicit tie labels.
    pub fn new(facing_tie: FacingLabel, side_tie: SideLabel) -> Self {
        Self {
            facing_tie,
            side_tie,
        }
    }

    /// Facing label for a dot product.
    pub fn facing_label(&self, dot: f64) -> FacingLabel {
        if dot > 0.0 {
            FacingLabel::Out
        } else if dot < 0.0 {
            FacingLabel::In
        } else {
            self.facing_tie
        }
    }

    /// Side label for a dot product.
    pub fn side_label(&self, dot: f64) -> SideLabel {
        if dot > 0.0 {
            SideLabel::Right
        } else if dot < 0.0 {
            SideLabel::Left
        } else {
            self.side_tie
        }
    }

    /// OUT when the antenna's facing axis points away from `center`.
    pub fn facing(&self, center: &Point3, antenna: &Pose) -> FacingDecision {
        let dot = antenna.facing().dot(&(antenna.origin - center));
        FacingDecision {
            label: self.facing_label(dot),
            dot,
        }
    }

    /// Side of `antenna` relative to `anchor`, measured along `reference`.
    ///
    /// Fails when the antenna origin coincides with `anchor`.
    pub fn side_about(&self, reference: &Vec3, anchor: &Point3, antenna: &Pose) -> Result<SideDecision> {
        let offset = normalize(&(antenna.origin - anchor))
            .map_err(|e| GeometryError::degenerate("antenna offset from side anchor", e))?;
        let dot = reference.dot(offset.as_ref());
        Ok(SideDecision {
            label: self.side_label(dot),
            dot,
        })
    }

    /// Side of `antenna` relative to its pipe along the group's principal axis.
    pub fn side(&self, axis: &Vec3, pipe_origin: &Point3, antenna: &Pose) -> Result<SideDecision> {
        self.side_about(axis, pipe_origin, antenna)
    }

    /// Side of `antenna` using the project-origin rule.
    ///
    /// The reference is the in-plane perpendicular of the pipe's direction
    /// from the world origin, and the antenna is measured from the world
    /// origin rather than from the pipe.
    pub fn side_from_origin(&self, pipe_origin: &Point3, antenna: &Pose) -> Result<SideDecision> {
        let reference = project_origin_reference(pipe_origin)?;
        self.side_about(&reference, &Point3::origin(), antenna)
    }
}

/// Perpendicular `(−y, x, z)` of the unit direction from the world origin
/// to `pipe_origin`.
pub fn project_origin_reference(pipe_origin: &Point3) -> Result<Vec3> {
    let p = normalize(&pipe_origin.coords)
        .map_err(|e| GeometryError::degenerate("pipe direction from project origin", e))?;
    Ok(Vec3::new(-p.y, p.x, p.z))
}

/// [`OrientationClassifier::facing`] with default tie labels.
pub fn classify_facing(center: &Point3, antenna: &Pose) -> FacingDecision {
    OrientationClassifier::default().facing(center, antenna)
}

/// [`OrientationClassifier::side`] with default tie labels.
pub fn classify_side(axis: &Vec3, pipe_origin: &Point3, antenna: &Pose) -> Result<SideDecision> {
    OrientationClassifier::default().side(axis, pipe_origin, antenna)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    fn facing_pose(origin: Point3, facing: Vec3) -> Pose {
        let up = Vec3::z();
        Pose::new(origin, facing.cross(&up), facing, up)
    }

    #[test]
    fn test_facing_out_and_in() {
        let center = Point3::origin();
        let out = facing_pose(Point3::new(10.0, 0.0, 0.0), Vec3::x());
        let d = classify_facing(&center, &out);
        assert_eq!(d.label, FacingLabel::Out);
        assert_relative_eq!(d.dot, 10.0);

        let inward = facing_pose(Point3::new(10.0, 0.0, 0.0), -Vec3::x());
        assert_eq!(classify_facing(&center, &inward).label, FacingLabel::In);
    }

    #[test]
    fn test_facing_tie_defaults_to_in() {
        let tangent = facing_pose(Point3::new(0.0, 10.0, 0.0), Vec3::x());
        let d = classify_facing(&Point3::origin(), &tangent);
        assert_eq!(d.dot, 0.0);
        assert_eq!(d.label, FacingLabel::In);

        let c = OrientationClassifier::new(FacingLabel::Out, SideLabel::Right);
        assert_eq!(c.facing(&Point3::origin(), &tangent).label, FacingLabel::Out);
    }

    #[test]
    fn test_side_left_and_right() {
        let axis = Vec3::y();
        let pipe = Point3::new(5.0, 5.0, 0.0);
        let right = Pose::at(Point3::new(5.0, 7.0, 0.0));
        let left = Pose::at(Point3::new(5.0, 3.0, 0.0));

        let d = classify_side(&axis, &pipe, &right).unwrap();
        assert_eq!(d.label, SideLabel::Right);
        assert_relative_eq!(d.dot, 1.0, epsilon = 1e-12);
        assert_eq!(classify_side(&axis, &pipe, &left).unwrap().label, SideLabel::Left);
    }

    #[test]
    fn test_side_tie_defaults_to_left() {
        let antenna = Pose::at(Point3::new(2.0, 0.0, 0.0));
        let d = classify_side(&Vec3::y(), &Point3::origin(), &antenna).unwrap();
        assert_eq!(d.dot, 0.0);
        assert_eq!(d.label, SideLabel::Left);

        let c = OrientationClassifier::new(FacingLabel::In, SideLabel::Right);
        let d = c.side(&Vec3::y(), &Point3::origin(), &antenna).unwrap();
        assert_eq!(d.label, SideLabel::Right);
    }

    #[test]
    fn test_side_coincident_antenna_is_degenerate() {
        let pipe = Point3::new(1.0, 1.0, 1.0);
        let err = classify_side(&Vec3::x(), &pipe, &Pose::at(pipe)).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }

    #[test]
    fn test_negating_axis_flips_nonzero_side_labels() {
        let rot = Rotation3::from_axis_angle(&Vec3::z_axis(), 0.7);
        let antennas: Vec<Pose> = [
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(-2.0, 4.0, 1.0),
            Point3::new(0.5, -3.0, -1.0),
            Point3::new(-4.0, -0.5, 2.0),
        ]
        .into_iter()
        .map(|p| Pose::from_rotation(p, &rot))
        .collect();

        let axis = Vec3::new(0.3, 0.9, 0.1);
        let pipe = Point3::new(0.5, 0.5, 0.0);
        for a in &antennas {
            let d = classify_side(&axis, &pipe, a).unwrap();
            let n = classify_side(&-axis, &pipe, a).unwrap();
            assert!(d.dot != 0.0);
            assert_eq!(n.label, d.label.opposite());
            assert_relative_eq!(n.dot, -d.dot, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_facing_flips_when_facing_axis_negated() {
        let center = Point3::new(1.0, 2.0, 0.0);
        let a = facing_pose(Point3::new(4.0, -1.0, 0.0), Vec3::new(0.6, 0.8, 0.0));
        let b = Pose { basis_y: -a.basis_y, ..a };
        let da = classify_facing(&center, &a);
        let db = classify_facing(&center, &b);
        assert!(da.dot != 0.0);
        assert_eq!(db.label, da.label.opposite());
    }

    #[test]
    fn test_side_from_project_origin() {
        // Pipe due east of the origin: the reference points north.
        let pipe = Point3::new(10.0, 0.0, 0.0);
        assert_relative_eq!(project_origin_reference(&pipe).unwrap(), Vec3::y(), epsilon = 1e-12);

        let c = OrientationClassifier::default();
        let north = Pose::at(Point3::new(10.0, 2.0, 0.0));
        let south = Pose::at(Point3::new(10.0, -2.0, 0.0));
        assert_eq!(c.side_from_origin(&pipe, &north).unwrap().label, SideLabel::Right);
        assert_eq!(c.side_from_origin(&pipe, &south).unwrap().label, SideLabel::Left);

        assert!(project_origin_reference(&Point3::origin()).is_err());
    }

    #[test]
    fn test_label_text_and_json() {
        assert_eq!(FacingLabel::Out.to_string(), "OUT");
        assert_eq!(SideLabel::Left.to_string(), "LEFT");
        assert_eq!(serde_json::to_value(SideLabel::Right).unwrap(), "RIGHT");
        let parsed: FacingLabel = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(parsed, FacingLabel::In);
    }
}
