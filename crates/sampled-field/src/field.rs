//! Gridded scalar field with bilinear evaluation.
//!
//! Samples live in one row-major buffer addressed by `iy * dim_x + ix`. The
//! lattice point `(ix, iy)` sits at `domain.min + (ix, iy) * interval`.
//!
//! A wrapped axis stores one column (or row) fewer than its period: the sample
//! at the reported `max` would be the same physical sample as the one at
//! `min`. After construction the field advances `domain.max` by one interval
//! on such axes, and neighbour lookups wrap with `mod dim`.

use geometry::{Domain, Point, Vector};
use tracing::debug;

use crate::boundary::{Axis, BoundaryBehavior};
use crate::error::{FieldError, Result};
use crate::interpolation::bilinear;
use crate::rows::RowSource;

/// Allowed drift of `domain.size() / interval` from a whole number.
const LATTICE_TOLERANCE: f64 = 1e-6;

/// Value and one-cell finite-difference gradient at a location.
///
/// The gradient is the change in value across one full cell along each axis,
/// not a per-unit-coordinate derivative. Divide by the interval to get the
/// latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub value: f64,
    pub gradient: Vector,
}

/// Lattice cell containing a conditioned location.
#[derive(Debug, Clone, Copy)]
struct CellLocation {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    tx: f64,
    ty: f64,
}

/// A scalar field sampled on a regular lattice.
#[derive(Debug, Clone)]
pub struct Field {
    domain: Domain,
    interval: Vector,
    behavior_x: BoundaryBehavior,
    behavior_y: BoundaryBehavior,
    dim_x: usize,
    dim_y: usize,
    samples: Vec<f64>,
}

impl Field {
    /// Allocate an all-zero lattice covering `domain` with spacing `interval`.
    ///
    /// `domain.size()` must be a whole multiple of `interval` on both axes, and
    /// wrapped or reflecting axes must have non-zero extent.
    pub fn new(
        domain: Domain,
        interval: Vector,
        behavior_x: BoundaryBehavior,
        behavior_y: BoundaryBehavior,
    ) -> Result<Self> {
        if !domain.is_valid() {
            return Err(FieldError::invalid_domain(format!("{:?}", domain)));
        }
        if !(interval.x > 0.0 && interval.y > 0.0 && interval.is_finite()) {
            return Err(FieldError::invalid_interval(format!(
                "interval must be positive on both axes, got {:?}",
                interval
            )));
        }

        let size = domain.size();
        let dim_x = lattice_dim(Axis::X, size.x, interval.x, behavior_x)?;
        let dim_y = lattice_dim(Axis::Y, size.y, interval.y, behavior_y)?;

        let mut logical = domain;
        logical.max.x += behavior_x.adjust_domain_max(domain.min.x, domain.max.x, interval.x);
        logical.max.y += behavior_y.adjust_domain_max(domain.min.y, domain.max.y, interval.y);

        debug!(
            dim_x,
            dim_y,
            interval_x = interval.x,
            interval_y = interval.y,
            behavior_x = %behavior_x,
            behavior_y = %behavior_y,
            "Allocated field lattice"
        );

        Ok(Self {
            domain: logical,
            interval,
            behavior_x,
            behavior_y,
            dim_x,
            dim_y,
            samples: vec![0.0; dim_x * dim_y],
        })
    }

    /// Build a field from an ingestion source and store every row.
    pub fn from_rows<S: RowSource + ?Sized>(
        source: &S,
        behavior_x: BoundaryBehavior,
        behavior_y: BoundaryBehavior,
    ) -> Result<Self> {
        let mut field = Self::new(source.domain(), source.interval(), behavior_x, behavior_y)?;
        let mut count = 0usize;
        for row in source.rows() {
            field.put_sample(row.xy, row.value)?;
            count += 1;
        }
        debug!(rows = count, "Populated field from rows");
        Ok(field)
    }

    /// Store `value` in the lattice cell nearest to `xy`.
    ///
    /// Writing the same coordinate twice keeps the last value.
    pub fn put_sample(&mut self, xy: Point, value: f64) -> Result<()> {
        let g = ((xy - self.domain.min).hadamard_div(self.interval)).round();
        let ix = to_index(g.x);
        let iy = to_index(g.y);
        if !self.in_lattice(ix, iy) {
            return Err(self.out_of_range(ix, iy));
        }
        let idx = iy as usize * self.dim_x + ix as usize;
        self.samples[idx] = value;
        Ok(())
    }

    /// Bilinear value and one-cell gradient at `xy`.
    pub fn evaluate(&self, xy: Point) -> Result<FieldSample> {
        let cell = self.locate(xy)?;
        let a = self.samples[cell.y0 * self.dim_x + cell.x0];
        let b = self.samples[cell.y0 * self.dim_x + cell.x1];
        let c = self.samples[cell.y1 * self.dim_x + cell.x0];
        let d = self.samples[cell.y1 * self.dim_x + cell.x1];

        let (value, gx, gy) = bilinear(a, b, c, d, cell.tx, cell.ty);
        Ok(FieldSample {
            value,
            gradient: Vector::new(gx, gy),
        })
    }

    /// Bilinear value at `xy`.
    pub fn value(&self, xy: Point) -> Result<f64> {
        self.evaluate(xy).map(|s| s.value)
    }

    /// One-cell finite-difference gradient at `xy`.
    pub fn gradient(&self, xy: Point) -> Result<Vector> {
        self.evaluate(xy).map(|s| s.gradient)
    }

    /// Logical domain. On wrapped axes `max` is one interval past the last
    /// stored lattice line.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn interval(&self) -> Vector {
        self.interval
    }

    /// Number of stored lattice points along x and y.
    pub fn dims(&self) -> (usize, usize) {
        (self.dim_x, self.dim_y)
    }

    pub fn behavior(&self, axis: Axis) -> BoundaryBehavior {
        match axis {
            Axis::X => self.behavior_x,
            Axis::Y => self.behavior_y,
        }
    }

    /// Logical length of the axis: the stored extent, plus one interval when
    /// the axis wraps.
    pub fn period_length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.domain.max.x - self.domain.min.x,
            Axis::Y => self.domain.max.y - self.domain.min.y,
        }
    }

    /// Number of lattice cells along an axis. A wrapped axis has a closing
    /// cell between its last and first lattice lines.
    pub fn cell_count(&self, axis: Axis) -> usize {
        let (dim, behavior) = match axis {
            Axis::X => (self.dim_x, self.behavior_x),
            Axis::Y => (self.dim_y, self.behavior_y),
        };
        if behavior.is_periodic() {
            dim
        } else {
            dim.saturating_sub(1)
        }
    }

    /// Raw sample buffer in row-major order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Stored sample at lattice indices, if in range.
    pub fn sample(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix < self.dim_x && iy < self.dim_y {
            Some(self.samples[iy * self.dim_x + ix])
        } else {
            None
        }
    }

    /// Coordinate of lattice point `(ix, iy)`.
    pub fn lattice_point(&self, ix: usize, iy: usize) -> Point {
        self.domain.min + Vector::new(ix as f64, iy as f64).hadamard(self.interval)
    }

    /// Minimum and maximum finite sample, or `None` if there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn locate(&self, xy: Point) -> Result<CellLocation> {
        let conditioned = Point::new(
            self.behavior_x
                .condition(xy.x, self.domain.min.x, self.domain.max.x),
            self.behavior_y
                .condition(xy.y, self.domain.min.y, self.domain.max.y),
        );
        let g = (conditioned - self.domain.min).hadamard_div(self.interval);
        let base = g.floor();

        let mut ix = to_index(base.x);
        let mut iy = to_index(base.y);
        // A conditioned coordinate a hair below the period can still round up to `dim`.
        if self.behavior_x.is_periodic() && ix != i64::MIN {
            ix = ix.rem_euclid(self.dim_x as i64);
        }
        if self.behavior_y.is_periodic() && iy != i64::MIN {
            iy = iy.rem_euclid(self.dim_y as i64);
        }
        if !self.in_lattice(ix, iy) {
            return Err(self.out_of_range(ix, iy));
        }

        let (x0, x1, tx) = cell_span(ix as usize, g.x - base.x, self.dim_x, self.behavior_x);
        let (y0, y1, ty) = cell_span(iy as usize, g.y - base.y, self.dim_y, self.behavior_y);
        Ok(CellLocation {
            x0,
            x1,
            y0,
            y1,
            tx,
            ty,
        })
    }

    fn in_lattice(&self, ix: i64, iy: i64) -> bool {
        ix >= 0 && iy >= 0 && (ix as usize) < self.dim_x && (iy as usize) < self.dim_y
    }

    fn out_of_range(&self, ix: i64, iy: i64) -> FieldError {
        FieldError::IndexOutOfRange {
            ix,
            iy,
            dim_x: self.dim_x,
            dim_y: self.dim_y,
        }
    }
}

/// Lower and upper lattice index along one axis plus the fraction between
/// them. Periodic axes close through index 0; elsewhere a point on the last
/// lattice line belongs to the last real cell, at fraction 1.
fn cell_span(i0: usize, t: f64, dim: usize, behavior: BoundaryBehavior) -> (usize, usize, f64) {
    if !behavior.is_periodic() && dim > 1 && i0 + 1 == dim {
        (i0 - 1, i0, t + 1.0)
    } else {
        (i0, (i0 + 1) % dim, t)
    }
}

/// Floor/rounded grid coordinate to a signed index. Non-finite input maps to
/// `i64::MIN` so it always fails the range check.
fn to_index(v: f64) -> i64 {
    if v.is_finite() {
        v as i64
    } else {
        i64::MIN
    }
}

fn lattice_dim(axis: Axis, size: f64, interval: f64, behavior: BoundaryBehavior) -> Result<usize> {
    if behavior.requires_extent() && size <= 0.0 {
        return Err(FieldError::DegenerateAxis { axis, behavior });
    }

    let cells = size / interval;
    let whole = cells.round();
    if (cells - whole).abs() >= LATTICE_TOLERANCE {
        return Err(FieldError::IntervalMismatch {
            axis,
            size,
            interval,
        });
    }
    Ok(whole as usize + 1)
}
