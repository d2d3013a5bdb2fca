//! Tests for marching-squares contour extraction.

use geometry::{Domain, Point, Segment, Vector};
use isoline::{contour, contour_levels, generate_levels, ContourSet};
use sampled_field::{BoundaryBehavior, Field, Row, Rows};

fn field_from_grid(
    values: &[&[f64]],
    behavior_x: BoundaryBehavior,
    behavior_y: BoundaryBehavior,
) -> Field {
    let mut rows = Vec::new();
    for (iy, row) in values.iter().enumerate() {
        for (ix, &v) in row.iter().enumerate() {
            rows.push(Row::new(ix as f64, iy as f64, v));
        }
    }
    Field::from_rows(&Rows::from_rows(rows).unwrap(), behavior_x, behavior_y).unwrap()
}

fn clamped(values: &[&[f64]]) -> Field {
    field_from_grid(values, BoundaryBehavior::Clamp, BoundaryBehavior::Clamp)
}

fn same_segment(s: &Segment, a: Point, b: Point) -> bool {
    let close = |p: Point, q: Point| p.distance(q) < 1e-12;
    (close(s.a, a) && close(s.b, b)) || (close(s.a, b) && close(s.b, a))
}

fn segments_in_cell(segments: &[Segment], ix: f64, iy: f64) -> Vec<Segment> {
    let cell = Domain::from_bounds(ix, iy, ix + 1.0, iy + 1.0);
    segments
        .iter()
        .copied()
        .filter(|s| cell.contains(s.midpoint()))
        .collect()
}

fn smooth_field(behavior_x: BoundaryBehavior, behavior_y: BoundaryBehavior) -> Field {
    let rows = Rows::procedural(
        Domain::from_bounds(-2.0, -1.0, 2.0, 1.0),
        Vector::new(0.25, 0.2),
        |p| (p.x * 1.3).sin() * (p.y * 2.1).cos() + 0.3 * p.x,
    )
    .unwrap();
    Field::from_rows(&rows, behavior_x, behavior_y).unwrap()
}

// ============================================================================
// Basic case tests
// ============================================================================

#[test]
fn test_flat_field_has_no_contour() {
    let field = clamped(&[&[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0]]);
    assert!(contour(&field, 1.0).is_empty());
    assert!(contour(&field, 9.0).is_empty());
    // all corners at the level count as above
    assert!(contour(&field, 5.0).is_empty());
}

#[test]
fn test_hyperbolic_paraboloid_single_segment() {
    let field = clamped(&[&[0.0, 0.0], &[0.0, 1.0]]);
    let segments = contour(&field, 0.5);

    assert_eq!(segments.len(), 1);
    assert!(same_segment(
        &segments[0],
        Point::new(0.5, 1.0),
        Point::new(1.0, 0.5)
    ));
}

#[test]
fn test_chord_is_off_the_true_iso_line() {
    let field = clamped(&[&[0.0, 0.0], &[0.0, 1.0]]);
    let chord_mid = contour(&field, 0.5)[0].midpoint();
    assert!((chord_mid.x - 0.75).abs() < 1e-12);
    assert!((field.value(chord_mid).unwrap() - 0.5).abs() > 0.05);

    let on_curve = Point::new(std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2);
    assert!((field.value(on_curve).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn test_horizontal_band() {
    let field = clamped(&[&[0.0, 0.0, 0.0], &[10.0, 10.0, 10.0]]);
    let segments = contour(&field, 2.5);
    assert_eq!(segments.len(), 2);
    for s in &segments {
        assert!((s.a.y - 0.25).abs() < 1e-12);
        assert!((s.b.y - 0.25).abs() < 1e-12);
        assert!((s.length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_vertical_band() {
    let field = clamped(&[&[0.0, 10.0], &[0.0, 10.0], &[0.0, 10.0]]);
    let segments = contour(&field, 7.5);
    assert_eq!(segments.len(), 2);
    for s in &segments {
        assert!((s.a.x - 0.75).abs() < 1e-12);
        assert!((s.b.x - 0.75).abs() < 1e-12);
    }
}

#[test]
fn test_peak_is_enclosed() {
    let field = clamped(&[&[0.0, 0.0, 0.0], &[0.0, 10.0, 0.0], &[0.0, 0.0, 0.0]]);
    let segments = contour(&field, 5.0);
    assert_eq!(segments.len(), 4);
    for s in &segments {
        assert!(s.a.distance(Point::new(1.0, 1.0)) <= 0.5 + 1e-12);
        assert!(s.b.distance(Point::new(1.0, 1.0)) <= 0.5 + 1e-12);
    }
}

#[test]
fn test_nan_cells_skipped() {
    let field = clamped(&[&[0.0, 10.0, 0.0], &[0.0, 10.0, f64::NAN]]);
    let segments = contour(&field, 5.0);
    // only the left cell is complete
    assert_eq!(segments.len(), 1);
    assert!(segments[0].midpoint().x < 1.0);
}

// ============================================================================
// Saddle tests
// ============================================================================

#[test]
fn test_saddle_pairing_with_smaller_squared_length() {
    // checkerboard with one raised corner in the bottom-left cell
    let field = clamped(&[&[0.0, 2.0, 0.0], &[1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]]);

    let segments = contour(&field, 0.75);
    let cell = segments_in_cell(&segments, 0.0, 0.0);
    assert_eq!(cell.len(), 2);

    // left-top + right-bottom costs 0.90625, left-bottom + right-top 1.40625
    assert!(cell
        .iter()
        .any(|s| same_segment(s, Point::new(0.0, 0.75), Point::new(0.25, 1.0))));
    assert!(cell
        .iter()
        .any(|s| same_segment(s, Point::new(1.0, 0.625), Point::new(0.375, 0.0))));
}

#[test]
fn test_saddle_resolution_is_reproducible() {
    let field = clamped(&[&[0.0, 2.0, 0.0], &[1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]]);
    let first = contour(&field, 0.75);
    for _ in 0..10 {
        assert_eq!(contour(&field, 0.75), first);
    }
    // every cell of the checkerboard is a saddle
    assert_eq!(first.len(), 8);
}

// ============================================================================
// Boundary behavior tests
// ============================================================================

#[test]
fn test_wrap_adds_closing_cells() {
    let grid: &[&[f64]] = &[&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0]];

    let clamped_segments = contour(&clamped(grid), 0.5);
    assert_eq!(clamped_segments.len(), 2);

    let wrapped = field_from_grid(grid, BoundaryBehavior::Wrap, BoundaryBehavior::Wrap);
    let wrapped_segments = contour(&wrapped, 0.5);
    // rising edge 0 -> 1 and falling seam 2 -> 0, each across three x cells
    assert_eq!(wrapped_segments.len(), 6);
    let seam: Vec<_> = wrapped_segments.iter().filter(|s| s.a.y > 2.0).collect();
    assert_eq!(seam.len(), 3);
    for s in seam {
        assert!((s.a.y - 2.75).abs() < 1e-12);
    }
}

#[test]
fn test_contour_endpoints_lie_on_level() {
    for (bx, by) in [
        (BoundaryBehavior::Clamp, BoundaryBehavior::Clamp),
        (BoundaryBehavior::Wrap, BoundaryBehavior::Wrap),
        (BoundaryBehavior::Value, BoundaryBehavior::Accordion),
    ] {
        let field = smooth_field(bx, by);
        for level in [-0.5, 0.0, 0.35] {
            let segments = contour(&field, level);
            assert!(!segments.is_empty());
            for s in &segments {
                for p in [s.a, s.b] {
                    let v = field.value(p).unwrap();
                    assert!(
                        (v - level).abs() < 1e-9,
                        "{:?} -> {} at level {} ({:?}/{:?})",
                        p,
                        v,
                        level,
                        bx,
                        by
                    );
                }
            }
        }
    }
}

// ============================================================================
// Multi-level tests
// ============================================================================

#[test]
fn test_contour_levels_matches_single_level() {
    let field = smooth_field(BoundaryBehavior::Clamp, BoundaryBehavior::Clamp);
    let (lo, hi) = field.value_range().unwrap();
    let levels = generate_levels(lo, hi, 0.25);
    assert!(levels.len() > 3);

    let sets = contour_levels(&field, &levels);
    assert_eq!(sets.len(), levels.len());
    for (set, &level) in sets.iter().zip(&levels) {
        assert_eq!(set.level, level);
        assert_eq!(set.segments, contour(&field, level));
    }
}

#[test]
fn test_contour_set_json() {
    let set = ContourSet {
        level: 1.5,
        segments: vec![Segment::new(Point::new(0.0, 1.0), Point::new(2.0, 3.0))],
    };
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["level"], 1.5);
    assert_eq!(json["segments"][0]["b"]["y"], 3.0);
}
