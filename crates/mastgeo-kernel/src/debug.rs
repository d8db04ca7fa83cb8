//! Plain-value debug geometry for hosts that want to draw what a pass saw.

use mastgeo_math::{DegenerateVector, Point3, Pose, Segment};
use serde::Serialize;

use crate::fixture::FixtureId;

/// A segment with a short text tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSegment {
    /// Tag, e.g. `"X"`.
    pub label: String,
    /// The segment.
    pub segment: Segment,
}

/// Basis lines of one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureFrame {
    /// The fixture.
    pub id: FixtureId,
    /// One line per basis axis.
    pub lines: Vec<LabeledSegment>,
}

/// Side reference line of one pipe group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLine {
    /// The pipe.
    pub pipe: FixtureId,
    /// Regression axis centered on the group's first antenna, or the
    /// project-origin reference starting at the origin.
    pub segment: Segment,
}

/// Everything a visualization layer may want from a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugGeometry {
    /// Bounding-box center of all antennas.
    pub center: Point3,
    /// One line per successfully classified pipe group.
    pub axis_lines: Vec<AxisLine>,
    /// Basis lines of every fixture with a usable frame.
    pub frames: Vec<FixtureFrame>,
}

/// Lines of `length` from the pose origin along each basis axis, tagged
/// `"X"`, `"Y"` and `"Z"`.
pub fn frame_lines(pose: &Pose, length: f64) -> Result<Vec<LabeledSegment>, DegenerateVector> {
    [("X", &pose.basis_x), ("Y", &pose.basis_y), ("Z", &pose.basis_z)]
        .into_iter()
        .map(|(label, axis)| {
            Ok(LabeledSegment {
                label: label.to_string(),
                segment: Segment::along(&pose.origin, axis, length)?,
            })
        })
        .collect()
}
