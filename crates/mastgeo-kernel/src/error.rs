//! Error types for the classification kernel.

use mastgeo_math::DegenerateVector;
use serde::Serialize;
use thiserror::Error;

use crate::fixture::FixtureId;

/// Errors produced by the classification kernel.
///
/// Every failure belongs to a single computation unit (one point set,
/// one pipe group or one fixture). A pass collects them per unit rather
/// than aborting.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryError {
    /// No points or fixtures where at least one is required.
    #[error("no {what} given")]
    EmptyInput {
        /// What was missing.
        what: String,
    },

    /// Too few points to estimate a principal axis.
    #[error("need at least 2 points to estimate an axis, got {got}")]
    InsufficientPoints {
        /// Number of points supplied.
        got: usize,
    },

    /// A vector was too short to normalize or to take an angle from.
    #[error("degenerate vector ({context}): length {length:e}")]
    DegenerateVector {
        /// Which vector it was.
        context: String,
        /// Its length.
        length: f64,
    },

    /// A pipe has no antennas within the proximity threshold.
    #[error("pipe {pipe} has no antennas within {threshold}")]
    EmptyGroup {
        /// The pipe.
        pipe: FixtureId,
        /// Threshold that was applied.
        threshold: f64,
    },

    /// Settings failed validation.
    #[error("invalid settings: {reason}")]
    InvalidSettings {
        /// What is wrong.
        reason: String,
    },
}

impl GeometryError {
    /// Build a [`GeometryError::EmptyInput`].
    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    /// Build a [`GeometryError::InvalidSettings`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// Wrap a [`DegenerateVector`] with a description of the vector.
    pub fn degenerate(context: impl Into<String>, err: DegenerateVector) -> Self {
        Self::DegenerateVector {
            context: context.into(),
            length: err.length,
        }
    }

    /// Whether the caller can skip the failing unit and carry on.
    ///
    /// Only configuration errors are not local to one unit.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidSettings { .. })
    }
}

impl From<DegenerateVector> for GeometryError {
    fn from(err: DegenerateVector) -> Self {
        Self::degenerate("vector", err)
    }
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
