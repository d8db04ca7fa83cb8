//! Scene files: fixtures exported by a host, as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mastgeo_kernel::{Fixture, FixtureKind};
use serde::{Deserialize, Serialize};

/// A set of posed fixtures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub fixtures: Vec<Fixture>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json).context("invalid scene JSON")?;
        Ok(scene)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn find(&self, id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id.0 == id)
    }

    pub fn count(&self, kind: FixtureKind) -> usize {
        self.fixtures.iter().filter(|f| f.kind == kind).count()
    }
}
