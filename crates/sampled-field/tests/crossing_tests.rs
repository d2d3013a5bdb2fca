//! Tests for trajectory crossing search.

use std::f64::consts::PI;

use geometry::{Domain, Point, Vector};
use sampled_field::{BoundaryBehavior, Field, FieldConfig, FieldError, Trajectory};

/// 2x2 unit lattice with a single raised corner: value(x, y) = x * y.
fn corner_field() -> Field {
    let mut field = Field::new(
        Domain::from_bounds(0.0, 0.0, 1.0, 1.0),
        Vector::new(1.0, 1.0),
        BoundaryBehavior::Clamp,
        BoundaryBehavior::Clamp,
    )
    .unwrap();
    field.put_sample(Point::new(1.0, 1.0), 1.0).unwrap();
    field
}

/// 2x2 unit lattice rising linearly along x: value(x, y) = base + rise * x.
fn ramp_field(base: f64, rise: f64) -> Field {
    let mut field = Field::new(
        Domain::from_bounds(0.0, 0.0, 1.0, 1.0),
        Vector::new(1.0, 1.0),
        BoundaryBehavior::Clamp,
        BoundaryBehavior::Clamp,
    )
    .unwrap();
    for (x, y) in [(0.0, 0.0), (0.0, 1.0)] {
        field.put_sample(Point::new(x, y), base).unwrap();
    }
    for (x, y) in [(1.0, 0.0), (1.0, 1.0)] {
        field.put_sample(Point::new(x, y), base + rise).unwrap();
    }
    field
}

/// Circular orbit around the centre of a 2x2 domain.
struct Orbit {
    center: Point,
    radius: f64,
}

impl Trajectory for Orbit {
    fn at(&self, t: f64) -> Point {
        let angle = 2.0 * PI * t;
        self.center + Vector::new(angle.cos(), angle.sin()) * self.radius
    }
}

// ============================================================================
// find_crossing tests
// ============================================================================

#[test]
fn test_crossing_converges_to_half() {
    let field = corner_field();
    let climb = |t: f64| Point::new(1.0, (1.0 - (PI * t).cos()) / 2.0);

    let crossing = field.find_crossing(&climb, 0.31, 0.71, 0.5).unwrap().unwrap();
    assert!((crossing.x - 0.5).abs() < 1e-6);
    assert!((crossing.value - 0.5).abs() < 1e-6);
    assert!((crossing.loc.y - 0.5).abs() < 1e-6);
    assert!(!crossing.above);
}

#[test]
fn test_crossing_direction_recorded_from_first_bracket() {
    let field = corner_field();
    let descend = |t: f64| Point::new(1.0, 1.0 - t);

    let crossing = field.find_crossing(&descend, 0.1, 0.9, 0.5).unwrap().unwrap();
    assert!(crossing.above);
    assert!((crossing.x - 0.5).abs() < 1e-6);
}

#[test]
fn test_same_side_returns_none() {
    let field = corner_field();
    let line = |t: f64| Point::new(t, t);

    // both ends below 0.5
    assert!(field.find_crossing(&line, 0.1, 0.6, 0.5).unwrap().is_none());
    // both ends above 0.25
    assert!(field.find_crossing(&line, 0.6, 0.9, 0.25).unwrap().is_none());
}

#[test]
fn test_none_iff_same_sign() {
    let field = corner_field();
    let line = |t: f64| Point::new(t, 0.8);
    let target = 0.4;

    for (xa, xb) in [(0.0, 1.0), (0.1, 0.4), (0.6, 0.95), (0.9, 0.2)] {
        let va = field.value(line(xa)).unwrap() - target;
        let vb = field.value(line(xb)).unwrap() - target;
        let result = field.find_crossing(&line, xa, xb, target).unwrap();
        assert_eq!(result.is_none(), (va >= 0.0) == (vb >= 0.0));
        if let Some(c) = result {
            assert!((c.value - target).abs() < 1e-6);
        }
    }
}

#[test]
fn test_iteration_ceiling() {
    let field = corner_field();
    // Discontinuous trajectory: jumps from the low corner to the high corner at t = 0.5.
    let jump = |t: f64| {
        if t < 0.5 {
            Point::new(0.0, 0.0)
        } else {
            Point::new(1.0, 1.0)
        }
    };
    let config = FieldConfig {
        crossing_max_iterations: 30,
        ..Default::default()
    };

    let err = field
        .find_crossing_with(&jump, 0.0, 1.0, 0.5, &config)
        .unwrap_err();
    assert!(matches!(err, FieldError::CrossingDidNotConverge { iterations: 30 }));
}

#[test]
fn test_crossing_on_tiny_values_lands_on_root() {
    let field = ramp_field(0.0, 1e-10);
    let across = |t: f64| Point::new(t, 0.5);
    let target = 2e-11;

    let crossing = field.find_crossing(&across, 0.0, 1.0, target).unwrap().unwrap();
    assert!((crossing.x - 0.2).abs() < 1e-6, "x = {}", crossing.x);
    assert!((crossing.value - target).abs() < 1e-6 * target);
    assert!(!crossing.above);
}

#[test]
fn test_crossing_on_large_values_lands_on_root() {
    let field = ramp_field(0.0, 1e6);
    let across = |t: f64| Point::new(t, 0.5);
    let target = 3e5;

    let crossing = field.find_crossing(&across, 1.0, 0.0, target).unwrap().unwrap();
    assert!((crossing.x - 0.3).abs() < 1e-6, "x = {}", crossing.x);
    assert!((crossing.value - target).abs() < 1e-6 * target);
    assert!(crossing.above);
}

#[test]
fn test_crossing_on_large_offset_lands_on_root() {
    // unit variation riding on a large baseline
    let field = ramp_field(1e6, 1.0);
    let across = |t: f64| Point::new(t, 0.5);

    let crossing = field
        .find_crossing(&across, 0.0, 1.0, 1e6 + 0.25)
        .unwrap()
        .unwrap();
    assert!((crossing.x - 0.25).abs() < 1e-6, "x = {}", crossing.x);
}

// ============================================================================
// find_crossings tests
// ============================================================================

#[test]
fn test_orbit_crossings() {
    let field = corner_field();
    let orbit = Orbit {
        center: Point::new(0.5, 0.5),
        radius: 0.4,
    };

    // x * y along the orbit peaks near t = 1/8 and dips near t = 5/8.
    let target = 0.3;
    let crossings = field.find_crossings(&orbit, 0.0, 1.0, target, 4).unwrap();
    assert_eq!(crossings.len(), 2);
    for c in &crossings {
        assert!((c.value - target).abs() < 1e-6);
        assert!((field.value(orbit.at(c.x)).unwrap() - target).abs() < 1e-6);
    }
    // falling through the target first, rising back through it later
    assert!(crossings[0].above);
    assert!(!crossings[1].above);
    assert!(crossings[0].x > 0.25 && crossings[0].x < 0.5);
    assert!(crossings[1].x > 0.75 && crossings[1].x < 1.0);
}

#[test]
fn test_crossings_missed_within_one_partition() {
    let field = corner_field();
    let orbit = Orbit {
        center: Point::new(0.5, 0.5),
        radius: 0.4,
    };

    // a single partition sees the same sign at both ends
    let crossings = field.find_crossings(&orbit, 0.0, 1.0, 0.3, 1).unwrap();
    assert!(crossings.is_empty());
}

#[test]
fn test_crossings_zero_count_rejected() {
    let field = corner_field();
    let line = |t: f64| Point::new(t, t);
    assert!(matches!(
        field.find_crossings(&line, 0.0, 1.0, 0.5, 0),
        Err(FieldError::InvalidParameter(_))
    ));
}
