//! Line segments and their supporting lines.

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// An undirected piece of a line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    pub fn length_squared(&self) -> f64 {
        self.a.distance_squared(self.b)
    }

    pub fn midpoint(&self) -> Point {
        self.a.midpoint(self.b)
    }

    /// Same segment with endpoints swapped.
    pub fn reversed(&self) -> Segment {
        Segment::new(self.b, self.a)
    }

    /// The infinite line through both endpoints, parameterised so that
    /// `line().at(0.0) == a` and `line().at(1.0) == b`.
    pub fn line(&self) -> Line {
        Line::new(self.a, self.b - self.a)
    }
}

/// An infinite line `origin + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub origin: Point,
    pub direction: Vector,
}

impl Line {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line.
    /// Returns 0 for a degenerate (zero-direction) line.
    pub fn project(&self, p: Point) -> f64 {
        let len2 = self.direction.norm_squared();
        if len2 == 0.0 {
            return 0.0;
        }
        (p - self.origin).dot(self.direction) / len2
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to(&self, p: Point) -> f64 {
        match self.direction.normalized() {
            Some(unit) => (p - self.origin).cross(unit).abs(),
            None => self.origin.distance(p),
        }
    }
}
