//! Tuning knobs for refinement and crossing search.

use serde::{Deserialize, Serialize};

/// Numerical limits used by refinement and crossing search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Damped Newton iterations per relocated point.
    pub refine_steps: usize,

    /// Maximum bisection depth when splitting a segment.
    pub max_refine_depth: usize,

    /// Gradient components smaller than this contribute no Newton displacement.
    pub gradient_epsilon: f64,

    /// Tolerance, relative to the initial bracket's value span, at which two
    /// bracket values count as equal.
    pub crossing_tolerance: f64,

    /// Bisection iterations before a crossing search gives up.
    pub crossing_max_iterations: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            refine_steps: 3,
            max_refine_depth: 64,
            gradient_epsilon: 1e-12,
            crossing_tolerance: 1e-9,
            crossing_max_iterations: 200,
        }
    }
}

impl FieldConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ISOLINE_REFINE_STEPS") {
            if let Ok(steps) = val.parse() {
                config.refine_steps = steps;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_MAX_REFINE_DEPTH") {
            if let Ok(depth) = val.parse() {
                config.max_refine_depth = depth;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_GRADIENT_EPSILON") {
            if let Ok(eps) = val.parse() {
                config.gradient_epsilon = eps;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_CROSSING_TOLERANCE") {
            if let Ok(tol) = val.parse() {
                config.crossing_tolerance = tol;
            }
        }

        if let Ok(val) = std::env::var("ISOLINE_CROSSING_MAX_ITERATIONS") {
            if let Ok(iterations) = val.parse() {
                config.crossing_max_iterations = iterations;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_refine_depth == 0 {
            return Err("max_refine_depth must be > 0".to_string());
        }

        if !(self.gradient_epsilon >= 0.0 && self.gradient_epsilon.is_finite()) {
            return Err("gradient_epsilon must be a finite non-negative number".to_string());
        }

        if !(self.crossing_tolerance > 0.0 && self.crossing_tolerance.is_finite()) {
            return Err("crossing_tolerance must be a finite positive number".to_string());
        }

        if self.crossing_max_iterations == 0 {
            return Err("crossing_max_iterations must be > 0".to_string());
        }

        Ok(())
    }
}
