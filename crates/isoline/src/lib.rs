//! Iso-line extraction and refinement for sampled scalar fields.
//!
//! Implements:
//! - Marching squares with a deterministic saddle tie-break
//! - Damped-Newton relocation of points onto an iso-line
//! - Adaptive bisection of contour segments to a maximum length
//! - Parallel extraction of many levels

pub mod levels;
pub mod marching;
pub mod refine;

pub use levels::{
    contour_levels, generate_levels, refined_contour, refined_contour_levels, ContourSet,
    MAX_GENERATED_LEVELS,
};
pub use marching::contour;
pub use refine::{
    refine_location, refine_location_with, refine_segment, refine_segment_with, refine_segments,
};
