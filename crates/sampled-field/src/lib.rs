//! Scalar fields reconstructed from scattered samples.
//!
//! Samples are snapped onto a regular lattice and evaluated with bilinear
//! interpolation. Each axis carries its own [`BoundaryBehavior`] deciding what
//! happens to coordinates outside the domain.
//!
//! ```text
//! scattered rows ──► Rows::from_rows ──► Field::from_rows
//!                    (domain, interval)        │
//!                                              ├─► evaluate / value / gradient
//!                                              │
//!                                              └─► find_crossing(s) along a Trajectory
//! ```
//!
//! # Example
//!
//! ```
//! use geometry::{Domain, Point, Vector};
//! use sampled_field::{BoundaryBehavior, Field, Rows};
//!
//! let rows = Rows::procedural(
//!     Domain::from_bounds(0.0, 0.0, 1.0, 1.0),
//!     Vector::new(0.5, 0.5),
//!     |p| p.x + p.y,
//! )?;
//! let field = Field::from_rows(&rows, BoundaryBehavior::Clamp, BoundaryBehavior::Clamp)?;
//! assert!((field.value(Point::new(0.25, 0.25))? - 0.5).abs() < 1e-12);
//! # Ok::<(), sampled_field::FieldError>(())
//! ```

pub mod boundary;
pub mod config;
pub mod crossing;
pub mod error;
pub mod field;
pub mod interpolation;
pub mod rows;

// Re-export commonly used types at crate root
pub use boundary::{Axis, BoundaryBehavior};
pub use config::FieldConfig;
pub use crossing::{Crossing, Trajectory};
pub use error::{FieldError, Result};
pub use field::{Field, FieldSample};
pub use interpolation::{inverse_lerp, lerp};
pub use rows::{Row, RowSource, Rows};
