//! Built-in procedural fields and field loading.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use geometry::{Domain, Point, Vector};
use sampled_field::{BoundaryBehavior, Field, Rows};
use tracing::info;

/// Analytic fields that can be sampled without an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProceduralField {
    /// `x * y`, a hyperbolic paraboloid with a saddle at the origin
    Saddle,
    /// Damped radial cosine waves around the origin
    Ripple,
    /// Tilted plane `x + y / 2`
    Ramp,
}

impl ProceduralField {
    /// Domain sampled when none is given on the command line.
    pub fn default_domain(self) -> Domain {
        match self {
            Self::Saddle => Domain::from_bounds(-1.0, -1.0, 1.0, 1.0),
            Self::Ripple => Domain::from_bounds(-4.0, -4.0, 4.0, 4.0),
            Self::Ramp => Domain::from_bounds(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Lattice spacing used when none is given on the command line.
    pub fn default_interval(self) -> Vector {
        match self {
            Self::Saddle => Vector::splat(0.1),
            Self::Ripple => Vector::splat(0.25),
            Self::Ramp => Vector::splat(0.25),
        }
    }

    pub fn sample(self, p: Point) -> f64 {
        match self {
            Self::Saddle => p.x * p.y,
            Self::Ripple => {
                let r = p.to_vector().norm();
                (r * std::f64::consts::PI).cos() * (-r / 4.0).exp()
            }
            Self::Ramp => p.x + 0.5 * p.y,
        }
    }
}

/// Read rows from a JSON file and build a field.
pub fn load_rows_file(
    path: &Path,
    behavior_x: BoundaryBehavior,
    behavior_y: BoundaryBehavior,
) -> Result<Field> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open rows file {}", path.display()))?;
    let rows = Rows::from_json_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse rows file {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "Loaded rows");

    Field::from_rows(&rows, behavior_x, behavior_y).context("Failed to build field from rows")
}

/// Sample a built-in field over `domain` (or its default) at `interval`.
pub fn build_procedural(
    kind: ProceduralField,
    domain: Option<Domain>,
    interval: Option<Vector>,
    behavior_x: BoundaryBehavior,
    behavior_y: BoundaryBehavior,
) -> Result<Field> {
    let domain = domain.unwrap_or_else(|| kind.default_domain());
    let interval = interval.unwrap_or_else(|| kind.default_interval());
    let rows = Rows::procedural(domain, interval, |p| kind.sample(p))
        .with_context(|| format!("Failed to sample {:?} field", kind))?;
    info!(field = ?kind, rows = rows.len(), "Sampled procedural field");

    Field::from_rows(&rows, behavior_x, behavior_y)
        .with_context(|| format!("Failed to build {:?} field", kind))
}
