//! Per-axis boundary conditioning.
//!
//! Before a coordinate is mapped onto the lattice it is passed through the
//! behavior configured for its axis, which brings it back inside the domain
//! bounds (or, for [`BoundaryBehavior::Value`], leaves it alone).

use serde::{Deserialize, Serialize};

/// Lattice axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// How an axis treats coordinates outside `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryBehavior {
    /// Identity. Out-of-range coordinates surface as an index error.
    Value,
    /// Saturate to `[min, max]`.
    #[default]
    Clamp,
    /// Periodic: the axis repeats with period `max - min`.
    Wrap,
    /// Reflecting fold: coordinates bounce off both ends.
    Accordion,
}

impl BoundaryBehavior {
    /// Bring `v` back inside the axis bounds.
    ///
    /// For `Wrap` the result lies in `[min, max)`; for `Clamp` and `Accordion`
    /// in `[min, max]`.
    pub fn condition(self, v: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Value => v,
            Self::Clamp => v.clamp(min, max),
            Self::Wrap => {
                let span = max - min;
                debug_assert!(span > 0.0, "wrap axis needs min < max");
                let folded = min + (v - min).rem_euclid(span);
                // rem_euclid can round up to exactly `span` for tiny negative offsets
                if folded >= max {
                    min
                } else {
                    folded
                }
            }
            Self::Accordion => {
                let span = max - min;
                debug_assert!(span > 0.0, "accordion axis needs min < max");
                let t = (v - min).rem_euclid(2.0 * span);
                let t = if t > span { 2.0 * span - t } else { t };
                min + t.clamp(0.0, span)
            }
        }
    }

    /// Amount by which a field advances this axis' reported maximum after
    /// construction. Only `Wrap` is non-zero: the last stored column stands for
    /// the same physical sample as the first, so the logical period is one
    /// interval longer than the stored extent.
    pub fn adjust_domain_max(self, _min: f64, _max: f64, interval: f64) -> f64 {
        match self {
            Self::Wrap => interval,
            _ => 0.0,
        }
    }

    /// True for behaviors that need a non-zero extent to be well defined.
    pub fn requires_extent(self) -> bool {
        matches!(self, Self::Wrap | Self::Accordion)
    }

    /// True if lattice neighbours wrap around from the last column to the first.
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Wrap)
    }
}

impl std::str::FromStr for BoundaryBehavior {
    type Err = String;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "value" | "none" => Ok(Self::Value),
            "clamp" => Ok(Self::Clamp),
            "wrap" | "periodic" => Ok(Self::Wrap),
            "accordion" | "reflect" => Ok(Self::Accordion),
            other => Err(format!("unknown boundary behavior '{}'", other)),
        }
    }
}

impl std::fmt::Display for BoundaryBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Clamp => write!(f, "clamp"),
            Self::Wrap => write!(f, "wrap"),
            Self::Accordion => write!(f, "accordion"),
        }
    }
}
