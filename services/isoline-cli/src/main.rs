//! Iso-line command-line driver.
//!
//! Builds a sampled field from a JSON rows file or a built-in procedural
//! function, then either:
//! - extracts contour segments at one or more levels (optionally refined), or
//! - searches a circular orbit for crossings of a target value.
//!
//! Results are written to stdout as JSON; logs go to stderr.

mod fields;
mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use geometry::{Domain, Point, Vector};
use isoline::{contour_levels, generate_levels, refined_contour_levels, MAX_GENERATED_LEVELS};
use sampled_field::{BoundaryBehavior, Field, FieldConfig};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fields::{build_procedural, load_rows_file, ProceduralField};
use report::{ContourReport, CrossingReport, FieldSummary, Orbit};

#[derive(Parser, Debug)]
#[command(name = "isoline-cli")]
#[command(about = "Extract iso-lines and value crossings from sampled scalar fields")]
struct Cli {
    #[command(flatten)]
    source: FieldSource,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where the field comes from and how its edges behave.
#[derive(Args, Debug)]
struct FieldSource {
    /// JSON file holding an array of {"x", "y", "value"} rows
    #[arg(long, env = "ISOLINE_ROWS", conflicts_with = "field")]
    rows: Option<PathBuf>,

    /// Built-in procedural field
    #[arg(long, value_enum, default_value = "saddle")]
    field: ProceduralField,

    /// Domain for procedural fields as "minx,miny,maxx,maxy"
    #[arg(long)]
    domain: Option<String>,

    /// Lattice spacing for procedural fields (same on both axes)
    #[arg(long)]
    interval: Option<f64>,

    /// Boundary behavior on the x axis: value, clamp, wrap, accordion
    #[arg(long, default_value = "clamp")]
    boundary_x: BoundaryBehavior,

    /// Boundary behavior on the y axis: value, clamp, wrap, accordion
    #[arg(long, default_value = "clamp")]
    boundary_y: BoundaryBehavior,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract contour segments
    Contour {
        /// Contour levels, comma separated
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        levels: Vec<f64>,

        /// Generate a level at every multiple of this step across the value range
        #[arg(long, conflicts_with = "levels")]
        every: Option<f64>,

        /// Split and refine segments until none is longer than this
        #[arg(long, env = "ISOLINE_MAX_SEGMENT_LENGTH")]
        max_segment_length: Option<f64>,
    },

    /// Find crossings of a target value along a circular orbit
    Crossings {
        /// Orbit center x
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        center_x: f64,

        /// Orbit center y
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        center_y: f64,

        /// Orbit radius
        #[arg(long)]
        radius: f64,

        /// Start parameter; one full turn spans 1.0
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        from: f64,

        /// End parameter
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        to: f64,

        /// Number of equal pieces searched independently
        #[arg(long, default_value = "8")]
        count: usize,

        /// Target value
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
    },
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = FieldConfig::from_env();
    if let Err(e) = config.validate() {
        bail!("Invalid configuration: {}", e);
    }
    info!(?config, "Loaded configuration");

    let field = load_field(&cli.source)?;

    match cli.command {
        Command::Contour {
            levels,
            every,
            max_segment_length,
        } => {
            let report = run_contour(&field, levels, every, max_segment_length, &config)?;
            write_json(&report, cli.pretty)
        }
        Command::Crossings {
            center_x,
            center_y,
            radius,
            from,
            to,
            count,
            target,
        } => {
            let orbit = Orbit {
                center: Point::new(center_x, center_y),
                radius,
                from,
                to,
            };
            let report = run_crossings(&field, orbit, target, count, &config)?;
            write_json(&report, cli.pretty)
        }
    }
}

fn load_field(source: &FieldSource) -> Result<Field> {
    if let Some(path) = &source.rows {
        return load_rows_file(path, source.boundary_x, source.boundary_y);
    }

    let domain = source
        .domain
        .as_deref()
        .map(Domain::from_bounds_string)
        .transpose()
        .context("Invalid --domain")?;
    let interval = source.interval.map(Vector::splat);

    build_procedural(
        source.field,
        domain,
        interval,
        source.boundary_x,
        source.boundary_y,
    )
}

fn run_contour(
    field: &Field,
    levels: Vec<f64>,
    every: Option<f64>,
    max_segment_length: Option<f64>,
    config: &FieldConfig,
) -> Result<ContourReport> {
    let levels = match every {
        Some(step) => {
            let (lo, hi) = field
                .value_range()
                .context("Field has no finite samples to derive levels from")?;
            let generated = generate_levels(lo, hi, step);
            let too_fine = step > 0.0 && (hi - lo) / step >= MAX_GENERATED_LEVELS as f64;
            if generated.is_empty() && too_fine {
                bail!(
                    "--every {} spans more than {} levels over [{}, {}]",
                    step,
                    MAX_GENERATED_LEVELS,
                    lo,
                    hi
                );
            }
            generated
        }
        None => levels,
    };
    if levels.is_empty() {
        bail!("No contour levels: pass --levels or a positive --every");
    }

    let contours = match max_segment_length {
        Some(max_len) => refined_contour_levels(field, &levels, max_len, config)
            .context("Contour refinement failed")?,
        None => contour_levels(field, &levels),
    };

    info!(
        levels = levels.len(),
        segments = contours.iter().map(|c| c.segments.len()).sum::<usize>(),
        "Contour extraction complete"
    );

    Ok(ContourReport {
        field: FieldSummary::of(field),
        max_segment_length,
        contours,
    })
}

fn run_crossings(
    field: &Field,
    orbit: Orbit,
    target: f64,
    count: usize,
    config: &FieldConfig,
) -> Result<CrossingReport> {
    if !(orbit.radius >= 0.0 && orbit.radius.is_finite()) {
        bail!("Orbit radius must be a finite non-negative number");
    }

    let center = orbit.center;
    let radius = orbit.radius;
    let trajectory = move |t: f64| {
        let angle = t * std::f64::consts::TAU;
        center + Vector::new(angle.cos(), angle.sin()) * radius
    };

    let crossings = field
        .find_crossings_with(&trajectory, orbit.from, orbit.to, target, count, config)
        .context("Crossing search failed")?;

    info!(found = crossings.len(), target, "Crossing search complete");

    Ok(CrossingReport {
        field: FieldSummary::of(field),
        orbit,
        target,
        expected_count: count,
        crossings,
    })
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
