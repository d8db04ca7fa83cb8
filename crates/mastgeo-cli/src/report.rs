//! Plain-text rendering of classification results.

use std::fmt;

use mastgeo_kernel::{plumb_angle, ClassificationPass, Fixture};

/// Table of per-antenna labels followed by warnings and skipped work.
pub struct PassReport<'a>(pub &'a ClassificationPass);

impl fmt::Display for PassReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass = self.0;
        writeln!(
            f,
            "center: ({:.3}, {:.3}, {:.3})",
            pass.center.x, pass.center.y, pass.center.z
        )?;
        writeln!(
            f,
            "{:<16} {:<6} {:<28} {:<16} {:>9}",
            "id", "facing", "sides", "code", "plumb"
        )?;
        for a in &pass.antennas {
            let sides = if a.sides.is_empty() {
                "-".to_string()
            } else {
                a.sides
                    .iter()
                    .map(|s| format!("{}:{}", s.pipe, s.decision.label))
                    .collect::<Vec<_>>()
                    .join(",")
            };
            let plumb = a
                .plumb
                .map(|p| format!("{:.3}", p.degrees))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:<16} {:<6} {:<28} {:<16} {:>9}",
                a.id,
                a.facing.label,
                sides,
                a.position_code(),
                plumb
            )?;
        }
        for g in pass.groups.iter().filter(|g| g.degenerate) {
            writeln!(f, "warning: pipe {} has a degenerate axis", g.pipe)?;
        }
        for id in &pass.non_orthonormal {
            writeln!(f, "warning: {id} has a non-orthonormal basis")?;
        }
        for failure in &pass.failures {
            match (&failure.antenna, &failure.pipe) {
                (Some(antenna), Some(pipe)) => {
                    writeln!(f, "skipped {antenna} at pipe {pipe}: {}", failure.error)?
                }
                (Some(antenna), None) => writeln!(f, "no plumb for {antenna}: {}", failure.error)?,
                (None, Some(pipe)) => writeln!(f, "skipped pipe {pipe}: {}", failure.error)?,
                (None, None) => writeln!(f, "skipped: {}", failure.error)?,
            }
        }
        Ok(())
    }
}

/// One line per fixture with its plumb angle or the reason there is none.
pub struct PlumbReport<'a>(pub Vec<&'a Fixture>);

impl fmt::Display for PlumbReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fixture in &self.0 {
            match plumb_angle(&fixture.pose) {
                Ok(p) => writeln!(
                    f,
                    "{:<16} {:<8} {:>9.3}° dot={:.6}",
                    fixture.id, fixture.kind, p.degrees, p.dot
                )?,
                Err(e) => writeln!(f, "{:<16} {:<8} {}", fixture.id, fixture.kind, e)?,
            }
        }
        Ok(())
    }
}
