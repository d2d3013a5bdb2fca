//! Adaptive refinement of contour segments.
//!
//! A raw marching-squares segment is a straight chord between two edge
//! crossings, while the true iso-line of a bilinear patch is a hyperbola. Long
//! segments are split at their midpoint, the midpoint is pulled back onto the
//! iso-line with a few damped Newton steps, and both halves are processed
//! again until every piece is short enough.
//!
//! Newton steps are halved because bilinear patches are only C0 across cell
//! boundaries: a full step can land in a neighbouring patch whose gradient is
//! quite different and oscillate from there.

use geometry::{Point, Segment};
use sampled_field::{Field, FieldConfig, FieldError, Result};
use tracing::{trace, warn};

/// Fraction of the full Newton step taken per iteration.
const NEWTON_DAMPING: f64 = 0.5;

/// Move `xy` toward the `target` iso-line with `steps` damped Newton
/// iterations.
pub fn refine_location(field: &Field, xy: Point, target: f64, steps: usize) -> Result<Point> {
    let config = FieldConfig {
        refine_steps: steps,
        ..Default::default()
    };
    refine_location_with(field, xy, target, &config)
}

/// Like [`refine_location`] with explicit tolerances.
///
/// Each iteration displaces by `interval ⊙ (1 / gradient) * -(value - target) / 2`.
/// The gradient is the one-cell difference reported by [`Field::evaluate`],
/// so multiplying by the interval converts back to coordinate units. Gradient
/// components below `config.gradient_epsilon` contribute no displacement.
pub fn refine_location_with(
    field: &Field,
    xy: Point,
    target: f64,
    config: &FieldConfig,
) -> Result<Point> {
    let interval = field.interval();
    let mut xy = xy;
    for step in 0..config.refine_steps {
        let sample = field.evaluate(xy)?;
        let half_delta = (sample.value - target) * NEWTON_DAMPING;
        let inverse = sample.gradient.recip_or_zero(config.gradient_epsilon);
        xy += interval.hadamard(inverse) * -half_delta;
        trace!(step, x = xy.x, y = xy.y, residual = sample.value - target, "Newton step");
    }
    Ok(xy)
}

/// Split `segment` until every piece is at most `max_len` long, appending the
/// pieces to `out` in order from `segment.a` to `segment.b`.
pub fn refine_segment(
    field: &Field,
    segment: Segment,
    target: f64,
    max_len: f64,
    out: &mut Vec<Segment>,
) -> Result<()> {
    refine_segment_with(field, segment, target, max_len, &FieldConfig::default(), out)
}

/// Like [`refine_segment`] with explicit limits.
///
/// Splitting deeper than `config.max_refine_depth` fails with
/// [`FieldError::RefinementDidNotConverge`]; pieces already appended to `out`
/// stay there.
pub fn refine_segment_with(
    field: &Field,
    segment: Segment,
    target: f64,
    max_len: f64,
    config: &FieldConfig,
    out: &mut Vec<Segment>,
) -> Result<()> {
    if !(max_len > 0.0 && max_len.is_finite()) {
        return Err(FieldError::invalid_parameter(format!(
            "max segment length must be positive, got {}",
            max_len
        )));
    }

    // Second half is pushed first so the first half is emitted first.
    let mut stack = vec![(segment, 0usize)];
    while let Some((piece, depth)) = stack.pop() {
        if piece.length() <= max_len {
            out.push(piece);
            continue;
        }
        if depth >= config.max_refine_depth {
            warn!(
                depth,
                length = piece.length(),
                max_len,
                "Segment refinement hit depth ceiling"
            );
            return Err(FieldError::RefinementDidNotConverge { depth });
        }

        let mid = refine_location_with(field, piece.midpoint(), target, config)?;
        stack.push((Segment::new(mid, piece.b), depth + 1));
        stack.push((Segment::new(piece.a, mid), depth + 1));
    }
    Ok(())
}

/// Refine every segment in `segments`.
pub fn refine_segments(
    field: &Field,
    segments: &[Segment],
    target: f64,
    max_len: f64,
    config: &FieldConfig,
) -> Result<Vec<Segment>> {
    let mut out = Vec::with_capacity(segments.len());
    for &segment in segments {
        refine_segment_with(field, segment, target, max_len, config, &mut out)?;
    }
    Ok(out)
}
