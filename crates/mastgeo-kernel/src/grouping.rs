//! Proximity grouping of antennas around pipes.
//!
//! An antenna joins a pipe's group when the distance between their
//! origins is strictly below the threshold. Groups are not exclusive: an
//! antenna close to two pipes is a member of both, and is classified once
//! per pipe downstream.

use mastgeo_math::Point3;

use crate::error::{GeometryError, Result};
use crate::fixture::Fixture;

/// Default proximity threshold in model length units.
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 5.0;

/// An antenna inside a pipe group.
#[derive(Debug, Clone, Copy)]
pub struct GroupMember<'a> {
    /// Position of the antenna in the slice handed to the grouper.
    pub index: usize,
    /// The antenna.
    pub fixture: &'a Fixture,
}

/// A pipe and the antennas close to it.
#[derive(Debug, Clone)]
pub struct PipeGroup<'a> {
    /// The pipe.
    pub pipe: &'a Fixture,
    /// Antennas within the threshold, in input order. Never empty.
    pub members: Vec<GroupMember<'a>>,
}

impl PipeGroup<'_> {
    /// Origins of the member antennas.
    pub fn origins(&self) -> Vec<Point3> {
        self.members.iter().map(|m| *m.fixture.origin()).collect()
    }

    /// Number of member antennas.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for groups built by this module.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Collect the antennas within `threshold` of `pipe`.
///
/// Fails with [`GeometryError::EmptyGroup`] when there are none; callers
/// usually skip that pipe.
pub fn group_for_pipe<'a>(
    pipe: &'a Fixture,
    antennas: &'a [Fixture],
    threshold: f64,
) -> Result<PipeGroup<'a>> {
    let members: Vec<GroupMember<'a>> = antennas
        .iter()
        .enumerate()
        .filter(|(_, a)| (a.origin() - pipe.origin()).norm() < threshold)
        .map(|(index, fixture)| GroupMember { index, fixture })
        .collect();

    if members.is_empty() {
        return Err(GeometryError::EmptyGroup {
            pipe: pipe.id.clone(),
            threshold,
        });
    }
    Ok(PipeGroup { pipe, members })
}

/// Group antennas by pipe, one entry per pipe in input order.
///
/// Each entry succeeds or fails independently.
pub fn group_by_nearest_pipe<'a>(
    antennas: &'a [Fixture],
    pipes: &'a [Fixture],
    threshold: f64,
) -> Vec<Result<PipeGroup<'a>>> {
    pipes
        .iter()
        .map(|pipe| group_for_pipe(pipe, antennas, threshold))
        .collect()
}
