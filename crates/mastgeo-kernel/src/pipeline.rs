//! A full classification pass over a set of antennas and pipes.
//!
//! 1. Bounding-box center of all antenna origins
//! 2. Facing label and plumb angle for every antenna
//! 3. Per pipe: proximity group, side reference, side label per member
//!
//! Step 3 runs independently per pipe (on the rayon pool when enabled).
//! A pipe or antenna that fails is recorded in
//! [`ClassificationPass::failures`] and the rest of the pass carries on.

use mastgeo_math::{Point3, Segment, Tolerance, Vec3};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::axis::estimate_axis;
use crate::centroid::bounding_box_center;
use crate::debug::{frame_lines, AxisLine, DebugGeometry, FixtureFrame};
use crate::error::{GeometryError, Result};
use crate::fixture::{partition_by_kind, Fixture, FixtureId};
use crate::grouping::group_for_pipe;
use crate::orient::{project_origin_reference, FacingDecision, OrientationClassifier, SideDecision};
use crate::plumb::{plumb_angle, PlumbAngle};
use crate::settings::{ClassifierSettings, SideStrategy};

/// Side label of an antenna with respect to one pipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideAssignment {
    /// The pipe whose group produced this label.
    pub pipe: FixtureId,
    /// Label and dot product.
    #[serde(flatten)]
    pub decision: SideDecision,
}

/// Labels for one antenna.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntennaClassification {
    /// The antenna.
    pub id: FixtureId,
    /// IN/OUT relative to the bounding-box center.
    pub facing: FacingDecision,
    /// LEFT/RIGHT per pipe group the antenna belongs to, in pipe order.
    pub sides: Vec<SideAssignment>,
    /// Tilt, when the lateral axis allows one.
    pub plumb: Option<PlumbAngle>,
}

impl AntennaClassification {
    /// Combined position text, e.g. `"RIGHTOUT"`.
    ///
    /// Each pipe's side label is prepended in pipe order, so with two pipes
    /// the last pipe's label comes first.
    pub fn position_code(&self) -> String {
        self.sides
            .iter()
            .fold(self.facing.label.to_string(), |code, side| {
                format!("{}{code}", side.decision.label)
            })
    }
}

/// What was computed for a pipe group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeGroupSummary {
    /// The pipe.
    pub pipe: FixtureId,
    /// Member antennas, in input order.
    pub members: Vec<FixtureId>,
    /// Rule used for the side reference.
    pub strategy: SideStrategy,
    /// Side reference vector (principal axis or project-origin perpendicular).
    pub reference: Vec3,
    /// Power iteration stalled; treat the reference as low confidence.
    pub degenerate: bool,
}

/// A pipe group, or one antenna, that could not be fully classified.
///
/// Side failures name the pipe. Plumb failures name only the antenna.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassFailure {
    /// The pipe, when the failure came from its group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipe: Option<FixtureId>,
    /// The antenna, when only one antenna failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antenna: Option<FixtureId>,
    /// Why.
    pub error: GeometryError,
}

/// Output of [`classify`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationPass {
    /// Bounding-box center of all antenna origins.
    pub center: Point3,
    /// One entry per antenna, in input order.
    pub antennas: Vec<AntennaClassification>,
    /// One entry per pipe that produced side labels, in input order.
    pub groups: Vec<PipeGroupSummary>,
    /// Pipes and antennas that were skipped.
    pub failures: Vec<PassFailure>,
    /// Fixtures whose basis is not orthonormal. Their labels are still
    /// computed, but the basis axes may not mean what the host intended.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_orthonormal: Vec<FixtureId>,
    /// Present when requested with [`classify_with_debug`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugGeometry>,
}

impl ClassificationPass {
    /// Look up an antenna's labels by id.
    pub fn antenna(&self, id: &str) -> Option<&AntennaClassification> {
        self.antennas.iter().find(|a| a.id.0 == id)
    }
}

/// Classify `fixtures`.
///
/// Fails only when the settings are invalid or there are no antennas.
pub fn classify(fixtures: &[Fixture], settings: &ClassifierSettings) -> Result<ClassificationPass> {
    run(fixtures, settings, false)
}

/// [`classify`] plus [`DebugGeometry`].
pub fn classify_with_debug(
    fixtures: &[Fixture],
    settings: &ClassifierSettings,
) -> Result<ClassificationPass> {
    run(fixtures, settings, true)
}

struct PipeOutcome {
    summary: PipeGroupSummary,
    sides: Vec<(usize, SideAssignment)>,
    failures: Vec<PassFailure>,
    axis_line: Option<Segment>,
}

fn run(fixtures: &[Fixture], settings: &ClassifierSettings, with_debug: bool) -> Result<ClassificationPass> {
    settings.validate()?;

    let (antennas, pipes) = partition_by_kind(fixtures);
    let origins: Vec<Point3> = antennas.iter().map(|a| *a.origin()).collect();
    let center = bounding_box_center(&origins).map_err(|_| GeometryError::empty("antennas"))?;
    debug!(
        antennas = antennas.len(),
        pipes = pipes.len(),
        center = ?center,
        "starting classification pass"
    );

    let non_orthonormal: Vec<FixtureId> = fixtures
        .iter()
        .filter(|f| !f.pose.is_orthonormal(&Tolerance::DEFAULT))
        .map(|f| {
            warn!(fixture = %f.id, "basis is not orthonormal");
            f.id.clone()
        })
        .collect();

    let classifier = settings.classifier();
    let mut failures = Vec::new();
    let mut results = Vec::with_capacity(antennas.len());
    for a in &antennas {
        let plumb = match plumb_angle(&a.pose) {
            Ok(p) => Some(p),
            Err(error) => {
                warn!(antenna = %a.id, error = %error, "no plumb angle");
                failures.push(PassFailure {
                    pipe: None,
                    antenna: Some(a.id.clone()),
                    error,
                });
                None
            }
        };
        results.push(AntennaClassification {
            id: a.id.clone(),
            facing: classifier.facing(&center, &a.pose),
            sides: Vec::new(),
            plumb,
        });
    }

    let process = |pipe: &Fixture| classify_pipe(pipe, &antennas, settings, &classifier);
    let outcomes: Vec<std::result::Result<PipeOutcome, PassFailure>> = if settings.parallel {
        pipes.par_iter().map(process).collect()
    } else {
        pipes.iter().map(process).collect()
    };

    let mut groups = Vec::new();
    let mut axis_lines = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(outcome) => {
                for (index, side) in outcome.sides {
                    results[index].sides.push(side);
                }
                if let Some(segment) = outcome.axis_line {
                    axis_lines.push(AxisLine {
                        pipe: outcome.summary.pipe.clone(),
                        segment,
                    });
                }
                failures.extend(outcome.failures);
                groups.push(outcome.summary);
            }
            Err(failure) => failures.push(failure),
        }
    }

    let debug = with_debug.then(|| DebugGeometry {
        center,
        axis_lines,
        frames: fixture_frames(fixtures, settings.debug_line_length),
    });

    info!(
        antennas = results.len(),
        groups = groups.len(),
        failures = failures.len(),
        "classification pass complete"
    );

    Ok(ClassificationPass {
        center,
        antennas: results,
        groups,
        failures,
        non_orthonormal,
        debug,
    })
}

fn classify_pipe(
    pipe: &Fixture,
    antennas: &[Fixture],
    settings: &ClassifierSettings,
    classifier: &OrientationClassifier,
) -> std::result::Result<PipeOutcome, PassFailure> {
    let pipe_failure = |error: GeometryError| {
        warn!(pipe = %pipe.id, error = %error, "skipping pipe");
        PassFailure {
            pipe: Some(pipe.id.clone()),
            antenna: None,
            error,
        }
    };

    let group = group_for_pipe(pipe, antennas, settings.proximity_threshold).map_err(pipe_failure)?;

    let (reference, anchor, degenerate) = match settings.side_strategy {
        SideStrategy::RegressionLine => {
            let est = estimate_axis(&group.origins(), settings.iterations, &settings.seed_vector())
                .map_err(pipe_failure)?;
            (est.axis.into_inner(), *pipe.origin(), est.degenerate)
        }
        SideStrategy::ProjectOrigin => {
            let reference = project_origin_reference(pipe.origin()).map_err(pipe_failure)?;
            (reference, Point3::origin(), false)
        }
    };
    if degenerate {
        warn!(pipe = %pipe.id, "principal axis is degenerate, side labels are low confidence");
    }
    debug!(
        pipe = %pipe.id,
        members = group.len(),
        reference = ?reference,
        "pipe group reference"
    );

    let mut sides = Vec::with_capacity(group.len());
    let mut failures = Vec::new();
    for member in &group.members {
        match classifier.side_about(&reference, &anchor, &member.fixture.pose) {
            Ok(decision) => {
                debug!(pipe = %pipe.id, antenna = %member.fixture.id, label = %decision.label, dot = decision.dot);
                sides.push((
                    member.index,
                    SideAssignment {
                        pipe: pipe.id.clone(),
                        decision,
                    },
                ));
            }
            Err(error) => {
                warn!(pipe = %pipe.id, antenna = %member.fixture.id, error = %error, "no side label");
                failures.push(PassFailure {
                    pipe: Some(pipe.id.clone()),
                    antenna: Some(member.fixture.id.clone()),
                    error,
                });
            }
        }
    }

    // Regression axes are drawn through the first member; project-origin
    // references start at the project origin.
    let length = settings.debug_line_length;
    let axis_line = match settings.side_strategy {
        SideStrategy::RegressionLine => group
            .members
            .first()
            .and_then(|m| Segment::through(m.fixture.origin(), &reference, length).ok()),
        SideStrategy::ProjectOrigin => Segment::along(&Point3::origin(), &reference, length).ok(),
    };

    Ok(PipeOutcome {
        summary: PipeGroupSummary {
            pipe: pipe.id.clone(),
            members: group.members.iter().map(|m| m.fixture.id.clone()).collect(),
            strategy: settings.side_strategy,
            reference,
            degenerate,
        },
        sides,
        failures,
        axis_line,
    })
}

fn fixture_frames(fixtures: &[Fixture], length: f64) -> Vec<FixtureFrame> {
    fixtures
        .iter()
        .filter_map(|f| match frame_lines(&f.pose, length) {
            Ok(lines) => Some(FixtureFrame {
                id: f.id.clone(),
                lines,
            }),
            Err(e) => {
                warn!(fixture = %f.id, error = %e, "no debug frame");
                None
            }
        })
        .collect()
}
