#![warn(missing_docs)]

//! Antenna orientation kernel for mastgeo.
//!
//! Given posed antennas and pipes, this crate derives for every antenna a
//! facing label (IN/OUT relative to the bounding-box center of all
//! antennas), a side label (LEFT/RIGHT along the principal axis of the
//! antennas hanging from the same pipe) and a plumb angle.
//!
//! Everything is a pure function of its inputs. Hosts supply fixtures and
//! decide what to do with the results; nothing here stores or draws.
//!
//! # Example
//!
//! ```
//! use mastgeo_kernel::{classify, ClassifierSettings, Fixture};
//! use mastgeo_math::{Point3, Pose, Vec3};
//!
//! let facing_out = |x: f64| Pose::new(Point3::new(x, 0.5, 0.0), Vec3::y(), -Vec3::x(), Vec3::z());
//! let fixtures = vec![
//!     Fixture::pipe("pipe", Pose::at(Point3::origin())),
//!     Fixture::antenna("a", facing_out(-1.0)),
//!     Fixture::antenna("b", facing_out(1.0)),
//! ];
//! let pass = classify(&fixtures, &ClassifierSettings::default())?;
//! assert_eq!(pass.antennas.len(), 2);
//! assert_eq!(pass.groups.len(), 1);
//! # Ok::<(), mastgeo_kernel::GeometryError>(())
//! ```

pub mod axis;
pub mod centroid;
pub mod debug;
pub mod error;
pub mod fixture;
pub mod grouping;
pub mod orient;
pub mod pipeline;
pub mod plumb;
pub mod settings;

pub use axis::{estimate_axis, principal_axis, AxisEstimate, ScatterMatrix};
pub use centroid::{bounding_box_center, centroid, Aabb3};
pub use debug::{frame_lines, DebugGeometry, LabeledSegment};
pub use error::{GeometryError, Result};
pub use fixture::{Fixture, FixtureId, FixtureKind};
pub use grouping::{group_by_nearest_pipe, group_for_pipe, PipeGroup};
pub use orient::{
    classify_facing, classify_side, FacingDecision, FacingLabel, OrientationClassifier,
    SideDecision, SideLabel,
};
pub use pipeline::{
    classify, classify_with_debug, AntennaClassification, ClassificationPass, PassFailure,
    PipeGroupSummary, SideAssignment,
};
pub use plumb::{plumb_angle, PlumbAngle};
pub use settings::{ClassifierSettings, SideStrategy};
