//! Fixtures: posed antennas and pipes as handed over by the host.

use std::fmt;

use mastgeo_math::{Point3, Pose};
use serde::{Deserialize, Serialize};

/// Opaque identity of a fixture, echoed back in results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(pub String);

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for FixtureId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FixtureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What a fixture is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    /// A communication device mounted near a pipe.
    Antenna,
    /// A vertical structural member antennas hang from.
    Pipe,
}

impl FixtureKind {
    /// Lowercase name, as used in scene files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Antenna => "antenna",
            Self::Pipe => "pipe",
        }
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A posed fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Host identity.
    pub id: FixtureId,
    /// Antenna or pipe.
    pub kind: FixtureKind,
    /// World-space placement.
    pub pose: Pose,
}

impl Fixture {
    /// Create a fixture.
    pub fn new(id: impl Into<FixtureId>, kind: FixtureKind, pose: Pose) -> Self {
        Self {
            id: id.into(),
            kind,
            pose,
        }
    }

    /// Create an antenna.
    pub fn antenna(id: impl Into<FixtureId>, pose: Pose) -> Self {
        Self::new(id, FixtureKind::Antenna, pose)
    }

    /// Create a pipe.
    pub fn pipe(id: impl Into<FixtureId>, pose: Pose) -> Self {
        Self::new(id, FixtureKind::Pipe, pose)
    }

    /// Origin of the fixture's pose.
    pub fn origin(&self) -> &Point3 {
        &self.pose.origin
    }
}

/// Split fixtures into `(antennas, pipes)`, keeping input order.
pub fn partition_by_kind(fixtures: &[Fixture]) -> (Vec<Fixture>, Vec<Fixture>) {
    fixtures
        .iter()
        .cloned()
        .partition(|f| f.kind == FixtureKind::Antenna)
}
