//! Minimal 2D geometry kernel shared by the field and contouring crates.

pub mod domain;
pub mod segment;
pub mod tuple;

pub use domain::{Domain, DomainParseError};
pub use segment::{Line, Segment};
pub use tuple::{Point, Vector};
