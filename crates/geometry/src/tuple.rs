//! Point and vector types.
//!
//! A location and a displacement are different things, so they get different
//! types. The arithmetic that makes sense between them is implemented; the
//! arithmetic that doesn't (adding two points, say) does not compile.
//!
//! | Left     | Op  | Right    | Result   |
//! |----------|-----|----------|----------|
//! | `Point`  | `-` | `Point`  | `Vector` |
//! | `Point`  | `±` | `Vector` | `Point`  |
//! | `Vector` | `±` | `Vector` | `Vector` |
//! | `Vector` | `*` | `f64`    | `Vector` |

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A location in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A displacement (or a per-axis quantity such as a grid spacing).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// `self * (1 - t) + other * t`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other - self).norm()
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        (other - self).norm_squared()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    pub fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    /// The point reached by displacing the origin by this vector.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Componentwise product.
    pub fn hadamard(self, other: Vector) -> Vector {
        Vector::new(self.x * other.x, self.y * other.y)
    }

    /// Componentwise quotient.
    pub fn hadamard_div(self, other: Vector) -> Vector {
        Vector::new(self.x / other.x, self.y / other.y)
    }

    /// Componentwise reciprocal. Components with magnitude below `epsilon`
    /// map to zero instead of blowing up.
    pub fn recip_or_zero(self, epsilon: f64) -> Vector {
        let recip = |v: f64| if v.abs() < epsilon { 0.0 } else { 1.0 / v };
        Vector::new(recip(self.x), recip(self.y))
    }

    pub fn floor(self) -> Vector {
        Vector::new(self.x.floor(), self.y.floor())
    }

    pub fn round(self) -> Vector {
        Vector::new(self.x.round(), self.y.round())
    }

    pub fn abs(self) -> Vector {
        Vector::new(self.x.abs(), self.y.abs())
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    pub fn cross(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Vector> {
        let n = self.norm();
        if n > 0.0 && n.is_finite() {
            Some(self * (1.0 / n))
        } else {
            None
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_difference_is_vector() {
        let v = Point::new(3.0, 5.0) - Point::new(1.0, 1.0);
        assert_eq!(v, Vector::new(2.0, 4.0));
        assert_eq!(Point::new(1.0, 1.0) + v, Point::new(3.0, 5.0));
    }

    #[test]
    fn test_hadamard() {
        let a = Vector::new(2.0, 3.0);
        let b = Vector::new(4.0, 0.5);
        assert_eq!(a.hadamard(b), Vector::new(8.0, 1.5));
        assert_eq!(a.hadamard(b).hadamard_div(b), a);
    }

    #[test]
    fn test_recip_or_zero() {
        let r = Vector::new(4.0, 1e-15).recip_or_zero(1e-12);
        assert_eq!(r, Vector::new(0.25, 0.0));
    }

    #[test]
    fn test_dot_cross_norm() {
        let a = Vector::new(3.0, 4.0);
        let b = Vector::new(-4.0, 3.0);
        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross(b), 25.0);
        assert_eq!(a.norm(), 5.0);
        assert!(Vector::ZERO.normalized().is_none());
    }

    #[test]
    fn test_floor_round() {
        let v = Vector::new(1.5, -1.5);
        assert_eq!(v.floor(), Vector::new(1.0, -2.0));
        assert_eq!(v.round(), Vector::new(2.0, -2.0));
        assert_eq!(Point::new(0.49, 2.51).round(), Point::new(0.0, 3.0));
    }
}
