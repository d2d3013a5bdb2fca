//! The ingestion contract: scattered `(x, y, value)` rows plus the lattice
//! they imply.
//!
//! Readers for particular file formats live outside this crate. Anything that
//! can report a domain, a uniform interval and a sequence of rows implements
//! [`RowSource`] and can populate a [`crate::Field`].

use std::io::Read;

use geometry::{Domain, Point, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, Result};

/// Coordinates closer than this (relative) are the same lattice line.
const COORD_EPSILON: f64 = 1e-9;

/// One scattered or generated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(flatten)]
    pub xy: Point,
    pub value: f64,
}

impl Row {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self {
            xy: Point::new(x, y),
            value,
        }
    }
}

/// Source of rows for field construction.
pub trait RowSource {
    /// Bounding box of the observed coordinates.
    fn domain(&self) -> Domain;

    /// Uniform lattice spacing per axis.
    fn interval(&self) -> Vector;

    /// Every sample to store.
    fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_>;
}

/// An in-memory row set with inferred lattice geometry.
#[derive(Debug, Clone)]
pub struct Rows {
    rows: Vec<Row>,
    domain: Domain,
    interval: Vector,
}

impl Rows {
    /// Infer the domain and interval from scattered rows.
    ///
    /// The domain is the bounding box of all coordinates. The interval on each
    /// axis is the smallest positive gap between distinct coordinate values.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self> {
        if rows.is_empty() {
            return Err(FieldError::EmptyRows);
        }

        let domain = rows
            .iter()
            .fold(Domain::empty(), |d, row| d.include(row.xy));
        if !domain.is_valid() {
            return Err(FieldError::invalid_domain(format!(
                "rows span non-finite domain {:?}",
                domain
            )));
        }

        let interval_x = infer_interval(rows.iter().map(|r| r.xy.x))
            .ok_or_else(|| FieldError::invalid_interval("rows have a single distinct x"))?;
        let interval_y = infer_interval(rows.iter().map(|r| r.xy.y))
            .ok_or_else(|| FieldError::invalid_interval("rows have a single distinct y"))?;

        debug!(
            rows = rows.len(),
            min_x = domain.min.x,
            min_y = domain.min.y,
            max_x = domain.max.x,
            max_y = domain.max.y,
            interval_x,
            interval_y,
            "Inferred lattice from rows"
        );

        Ok(Self {
            rows,
            domain,
            interval: Vector::new(interval_x, interval_y),
        })
    }

    /// Fill every lattice point of `domain` spaced by `interval` with `f`.
    pub fn procedural(
        domain: Domain,
        interval: Vector,
        mut f: impl FnMut(Point) -> f64,
    ) -> Result<Self> {
        if !domain.is_valid() {
            return Err(FieldError::invalid_domain(format!("{:?}", domain)));
        }
        if !(interval.x > 0.0 && interval.y > 0.0 && interval.is_finite()) {
            return Err(FieldError::invalid_interval(format!("{:?}", interval)));
        }

        let cells = domain.size().hadamard_div(interval).round();
        let nx = cells.x as usize + 1;
        let ny = cells.y as usize + 1;

        let mut rows = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            for ix in 0..nx {
                let xy = domain.min + Vector::new(ix as f64, iy as f64).hadamard(interval);
                rows.push(Row { xy, value: f(xy) });
            }
        }

        Ok(Self {
            rows,
            domain,
            interval,
        })
    }

    /// Decode a JSON array of `{"x": .., "y": .., "value": ..}` objects.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let rows: Vec<Row> = serde_json::from_reader(reader)?;
        Self::from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.rows
    }
}

impl RowSource for Rows {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn interval(&self) -> Vector {
        self.interval
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
        Box::new(self.rows.iter().copied())
    }
}

fn same_coordinate(a: f64, b: f64) -> bool {
    (a - b).abs() <= COORD_EPSILON * 1f64.max(a.abs()).max(b.abs())
}

/// Smallest positive gap between distinct values, or `None` if there is only
/// one distinct value.
fn infer_interval(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| same_coordinate(*a, *b));

    values
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .min_by(f64::total_cmp)
}
