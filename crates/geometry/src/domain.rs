//! Axis-aligned bounding rectangles.

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// An axis-aligned rectangle spanned by `min` and `max`.
///
/// The empty domain has `min = (+inf, +inf)` and `max = (-inf, -inf)`, which
/// makes it the identity for [`Domain::union`] and [`Domain::include`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: Point,
    pub max: Point,
}

impl Domain {
    /// Create a domain from its corners. No validation is performed.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a domain from corner coordinates.
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// The identity element for union.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Parse a `"minx,miny,maxx,maxy"` string.
    pub fn from_bounds_string(s: &str) -> Result<Self, DomainParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(DomainParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| DomainParseError::InvalidNumber(p.to_string()))
        };

        let domain = Self::from_bounds(
            parse(parts[0])?,
            parse(parts[1])?,
            parse(parts[2])?,
            parse(parts[3])?,
        );
        if !domain.is_valid() {
            return Err(DomainParseError::Inverted(s.to_string()));
        }
        Ok(domain)
    }

    /// `min <= max` on both axes and all coordinates finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    /// True if the domain contains no points.
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest domain covering both.
    pub fn union(&self, other: &Domain) -> Domain {
        Domain {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Smallest domain covering this one and `p`.
    pub fn include(&self, p: Point) -> Domain {
        self.union(&Domain::new(p, p))
    }

    /// Overlap of the two domains, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Domain) -> Option<Domain> {
        let d = Domain {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if d.is_empty() {
            None
        } else {
            Some(d)
        }
    }

    pub fn intersects(&self, other: &Domain) -> bool {
        self.intersection(other).is_some()
    }

    /// Scale both corners componentwise. A negative factor flips the axis, in
    /// which case the corners are swapped back into order.
    pub fn scale(&self, factor: Vector) -> Domain {
        let a = self.min.to_vector().hadamard(factor).to_point();
        let b = self.max.to_vector().hadamard(factor).to_point();
        Domain {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Grow (or shrink, for negative `margin`) by `margin` on every side.
    pub fn expand(&self, margin: Vector) -> Domain {
        Domain {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainParseError {
    #[error("Invalid domain format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in domain: {0}")]
    InvalidNumber(String),

    #[error("Domain corners are inverted: {0}")]
    Inverted(String),
}
