//! Scalar interpolation primitives used by the field and the contour extractor.

use geometry::Point;

/// Linear interpolation `q * t + p * (1 - t)`.
///
/// Exact at `t == 0` (returns `p`), which is what makes bilinear evaluation
/// reproduce stored samples at lattice points.
#[inline]
pub fn lerp(p: f64, q: f64, t: f64) -> f64 {
    q * t + p * (1.0 - t)
}

/// Point on the edge `start -> end` where the linearly interpolated value
/// equals `target`.
///
/// If the end values are equal there is no unique crossing and the edge
/// midpoint is returned.
pub fn inverse_lerp(
    target: f64,
    start: Point,
    start_value: f64,
    end: Point,
    end_value: f64,
) -> Point {
    let denom = end_value - start_value;
    if denom == 0.0 {
        return start.midpoint(end);
    }
    let t = (target - start_value) / denom;
    start.lerp(end, t)
}

/// Bilinear blend of four corner values.
///
/// `a` bottom-left, `b` bottom-right, `c` top-left, `d` top-right; `tx`, `ty`
/// the fractional position inside the cell. Returns the interpolated value and
/// the one-cell finite differences `(right - left, top - bottom)`.
pub fn bilinear(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> (f64, f64, f64) {
    let left = lerp(a, c, ty);
    let right = lerp(b, d, ty);
    let bottom = lerp(a, b, tx);
    let top = lerp(c, d, tx);
    (lerp(left, right, tx), right - left, top - bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 0.5), 5.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
    }

    #[test]
    fn test_inverse_lerp() {
        let p = inverse_lerp(5.0, Point::new(0.0, 0.0), 0.0, Point::new(1.0, 0.0), 10.0);
        assert!((p.x - 0.5).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_inverse_lerp_flat_edge() {
        let p = inverse_lerp(5.0, Point::new(0.0, 0.0), 5.0, Point::new(0.0, 2.0), 5.0);
        assert_eq!(p, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_bilinear_corners_and_center() {
        let (v, gx, gy) = bilinear(1.0, 2.0, 3.0, 4.0, 0.0, 0.0);
        assert_eq!(v, 1.0);
        assert_eq!(gx, 1.0);
        assert_eq!(gy, 2.0);

        let (v, _, _) = bilinear(1.0, 2.0, 3.0, 4.0, 0.5, 0.5);
        assert!((v - 2.5).abs() < 1e-12);
    }
}
