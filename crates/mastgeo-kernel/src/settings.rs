//! Classification settings.

use mastgeo_math::{Vec3, DEGENERATE_EPSILON};
use serde::{Deserialize, Serialize};

use crate::axis::{DEFAULT_ITERATIONS, DEFAULT_SEED};
use crate::error::{GeometryError, Result};
use crate::grouping::DEFAULT_PROXIMITY_THRESHOLD;
use crate::orient::{FacingLabel, OrientationClassifier, SideLabel};

/// How the side reference vector of a pipe group is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideStrategy {
    /// Principal axis of the group's antenna origins, antennas measured
    /// from the pipe. Needs at least two antennas.
    #[default]
    RegressionLine,
    /// Perpendicular of the pipe's direction from the project origin,
    /// antennas measured from the project origin.
    ProjectOrigin,
}

/// Parameters of a classification pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Antennas strictly closer than this to a pipe join its group.
    pub proximity_threshold: f64,
    /// Power iteration count for axis estimation.
    pub iterations: usize,
    /// Power iteration seed (normalized before use).
    pub seed: [f64; 3],
    /// Facing label for a zero dot product.
    pub facing_tie: FacingLabel,
    /// Side label for a zero dot product.
    pub side_tie: SideLabel,
    /// Side reference rule.
    pub side_strategy: SideStrategy,
    /// Process pipe groups on the rayon pool.
    pub parallel: bool,
    /// Half-length of debug axis lines and length of frame lines.
    pub debug_line_length: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
            facing_tie: FacingLabel::In,
            side_tie: SideLabel::Left,
            side_strategy: SideStrategy::RegressionLine,
            parallel: true,
            debug_line_length: 100.0,
        }
    }
}

impl ClassifierSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.proximity_threshold.is_finite() || self.proximity_threshold <= 0.0 {
            return Err(GeometryError::invalid(
                "proximity_threshold must be a positive finite number",
            ));
        }
        let seed = self.seed_vector();
        if seed.iter().any(|c| !c.is_finite()) || seed.norm() < DEGENERATE_EPSILON {
            return Err(GeometryError::invalid("seed must be a finite non-zero vector"));
        }
        if !self.debug_line_length.is_finite() || self.debug_line_length <= 0.0 {
            return Err(GeometryError::invalid(
                "debug_line_length must be a positive finite number",
            ));
        }
        Ok(())
    }

    /// Seed as a vector.
    pub fn seed_vector(&self) -> Vec3 {
        Vec3::from(self.seed)
    }

    /// Label classifier carrying the configured tie labels.
    pub fn classifier(&self) -> OrientationClassifier {
        OrientationClassifier::new(self.facing_tie, self.side_tie)
    }

    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s).map_err(|e| GeometryError::invalid(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GeometryError::invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = ClassifierSettings::default();
        s.validate().unwrap();
        assert_eq!(s.proximity_threshold, 5.0);
        assert_eq!(s.iterations, 50);
        assert_eq!(s.classifier(), OrientationClassifier::default());
    }

    #[test]
    fn test_invalid_threshold() {
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let s = ClassifierSettings {
                proximity_threshold: t,
                ..Default::default()
            };
            assert!(matches!(s.validate(), Err(GeometryError::InvalidSettings { .. })));
        }
    }

    #[test]
    fn test_zero_seed_rejected() {
        let s = ClassifierSettings {
            seed: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let s = ClassifierSettings::from_toml_str(
            r#"
            proximity_threshold = 2.5
            side_strategy = "project_origin"
            facing_tie = "OUT"
            "#,
        )
        .unwrap();
        assert_eq!(s.proximity_threshold, 2.5);
        assert_eq!(s.side_strategy, SideStrategy::ProjectOrigin);
        assert_eq!(s.facing_tie, FacingLabel::Out);
        assert_eq!(s.iterations, DEFAULT_ITERATIONS);
        assert_eq!(s.side_tie, SideLabel::Left);
    }

    #[test]
    fn test_toml_round_trip() {
        let s = ClassifierSettings {
            iterations: 7,
            parallel: false,
            ..Default::default()
        };
        let text = s.to_toml_string().unwrap();
        assert_eq!(ClassifierSettings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn test_bad_toml() {
        assert!(ClassifierSettings::from_toml_str("iterations = \"many\"").is_err());
        assert!(ClassifierSettings::from_toml_str("proximity_threshold = -3.0").is_err());
    }
}
