//! Multi-level contour extraction.

use geometry::Segment;
use rayon::prelude::*;
use sampled_field::{Field, FieldConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::marching::contour;
use crate::refine::refine_segments;

/// Segments extracted for one contour level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    pub level: f64,
    pub segments: Vec<Segment>,
}

/// Upper bound on the number of levels [`generate_levels`] will produce.
pub const MAX_GENERATED_LEVELS: usize = 10_000;

/// Generate contour levels automatically based on data range and interval.
///
/// Returns every multiple of `interval` in `[min_value, max_value]`. Empty if
/// the interval is not positive, the range is inverted, or the range would
/// hold more than [`MAX_GENERATED_LEVELS`] levels.
pub fn generate_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(max_value >= min_value) {
        return vec![];
    }

    // Start from first multiple of interval at or above min_value
    let first = (min_value / interval).ceil();
    let last = (max_value / interval).floor();
    if last < first {
        return vec![];
    }

    let count = last - first + 1.0;
    if !(count <= MAX_GENERATED_LEVELS as f64) {
        warn!(
            min_value,
            max_value,
            interval,
            max_levels = MAX_GENERATED_LEVELS,
            "Level interval too fine for value range"
        );
        return vec![];
    }

    (0..count as usize)
        .map(|i| (first + i as f64) * interval)
        .collect()
}

/// Extract every level independently. Levels are processed in parallel;
/// output order matches `levels`.
pub fn contour_levels(field: &Field, levels: &[f64]) -> Vec<ContourSet> {
    let sets: Vec<ContourSet> = levels
        .par_iter()
        .map(|&level| ContourSet {
            level,
            segments: contour(field, level),
        })
        .collect();

    debug!(
        levels = sets.len(),
        total_segments = sets.iter().map(|s| s.segments.len()).sum::<usize>(),
        "Extracted contour levels"
    );

    sets
}

/// Extract one level and refine every raw segment to at most `max_len`.
pub fn refined_contour(
    field: &Field,
    level: f64,
    max_len: f64,
    config: &FieldConfig,
) -> Result<ContourSet> {
    let raw = contour(field, level);
    let segments = refine_segments(field, &raw, level, max_len, config)?;
    debug!(
        level,
        raw = raw.len(),
        refined = segments.len(),
        max_len,
        "Refined contour"
    );
    Ok(ContourSet { level, segments })
}

/// Refined extraction for several levels, in parallel.
pub fn refined_contour_levels(
    field: &Field,
    levels: &[f64],
    max_len: f64,
    config: &FieldConfig,
) -> Result<Vec<ContourSet>> {
    levels
        .par_iter()
        .map(|&level| refined_contour(field, level, max_len, config))
        .collect()
}
