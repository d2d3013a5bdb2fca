//! Crossing search along a one-parameter trajectory.
//!
//! A trajectory maps a scalar parameter (time along an orbit, arc length, ...)
//! to a query location. The field value along it is treated as a function of
//! that parameter and bracketed roots of `value - target` are found by
//! bisection.

use geometry::Point;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::field::Field;

/// Maps a scalar parameter to a field-query location.
pub trait Trajectory {
    fn at(&self, x: f64) -> Point;
}

impl<F> Trajectory for F
where
    F: Fn(f64) -> Point,
{
    fn at(&self, x: f64) -> Point {
        self(x)
    }
}

/// A located crossing of the target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    /// Trajectory parameter.
    pub x: f64,
    /// Query location at `x`.
    pub loc: Point,
    /// Field value at the converged bracket.
    pub value: f64,
    /// Whether the value at the first bracket endpoint (`xa`) was at or above
    /// the target.
    pub above: bool,
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    x: f64,
    loc: Point,
    value: f64,
    above: bool,
}

impl Field {
    /// Find the crossing of `target` between parameters `xa` and `xb` with
    /// the default configuration.
    ///
    /// Returns `Ok(None)` when both ends lie on the same side of the target.
    pub fn find_crossing<T: Trajectory + ?Sized>(
        &self,
        trajectory: &T,
        xa: f64,
        xb: f64,
        target: f64,
    ) -> Result<Option<Crossing>> {
        self.find_crossing_with(trajectory, xa, xb, target, &FieldConfig::default())
    }

    /// Like [`Field::find_crossing`] with explicit tolerances.
    ///
    /// Bisection stops once the two bracket *values* agree within
    /// `config.crossing_tolerance` times the value span of the initial
    /// bracket, so the stopping rule scales with the data. The gap is never
    /// required to be finer than a few ulps of the values themselves. If the
    /// bracket has not closed after `config.crossing_max_iterations` halvings
    /// the search fails.
    pub fn find_crossing_with<T: Trajectory + ?Sized>(
        &self,
        trajectory: &T,
        xa: f64,
        xb: f64,
        target: f64,
        config: &FieldConfig,
    ) -> Result<Option<Crossing>> {
        let probe = |x: f64| -> Result<Probe> {
            let loc = trajectory.at(x);
            let value = self.value(loc)?;
            Ok(Probe {
                x,
                loc,
                value,
                above: value >= target,
            })
        };

        let mut lo = probe(xa)?;
        let mut hi = probe(xb)?;
        if lo.above == hi.above {
            return Ok(None);
        }
        let above = lo.above;
        let span = (hi.value - lo.value).abs();

        let mut iterations = 0;
        while !values_similar(lo.value, hi.value, config.crossing_tolerance, span) {
            if iterations == config.crossing_max_iterations {
                warn!(
                    xa,
                    xb,
                    target,
                    lo = lo.value,
                    hi = hi.value,
                    iterations,
                    "Crossing bisection hit iteration ceiling"
                );
                return Err(FieldError::CrossingDidNotConverge { iterations });
            }

            let mid = probe(0.5 * (lo.x + hi.x))?;
            if mid.above == lo.above {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }

        trace!(iterations, x = 0.5 * (lo.x + hi.x), "Crossing converged");

        Ok(Some(Crossing {
            x: 0.5 * (lo.x + hi.x),
            loc: lo.loc.midpoint(hi.loc),
            value: 0.5 * (lo.value + hi.value),
            above,
        }))
    }

    /// Split `[xa, xb]` into `expected_count` equal pieces and search each one
    /// independently with the default configuration.
    ///
    /// Two crossings inside the same piece cancel out and are not reported.
    pub fn find_crossings<T: Trajectory + ?Sized>(
        &self,
        trajectory: &T,
        xa: f64,
        xb: f64,
        target: f64,
        expected_count: usize,
    ) -> Result<Vec<Crossing>> {
        self.find_crossings_with(
            trajectory,
            xa,
            xb,
            target,
            expected_count,
            &FieldConfig::default(),
        )
    }

    /// Like [`Field::find_crossings`] with explicit tolerances.
    pub fn find_crossings_with<T: Trajectory + ?Sized>(
        &self,
        trajectory: &T,
        xa: f64,
        xb: f64,
        target: f64,
        expected_count: usize,
        config: &FieldConfig,
    ) -> Result<Vec<Crossing>> {
        if expected_count == 0 {
            return Err(FieldError::invalid_parameter(
                "expected_count must be at least 1",
            ));
        }

        let step = (xb - xa) / expected_count as f64;
        let mut crossings = Vec::new();
        for i in 0..expected_count {
            let start = xa + step * i as f64;
            let end = if i + 1 == expected_count {
                xb
            } else {
                xa + step * (i + 1) as f64
            };
            if let Some(crossing) = self.find_crossing_with(trajectory, start, end, target, config)? {
                crossings.push(crossing);
            }
        }
        Ok(crossings)
    }
}

/// `a` and `b` agree within `tolerance * span`, or within a few ulps of their
/// own magnitude when that is coarser.
fn values_similar(a: f64, b: f64, tolerance: f64, span: f64) -> bool {
    let resolution = 4.0 * f64::EPSILON * a.abs().max(b.abs());
    (a - b).abs() <= (tolerance * span).max(resolution)
}
