//! JSON documents written to stdout.

use geometry::{Domain, Point, Vector};
use isoline::ContourSet;
use sampled_field::{Axis, BoundaryBehavior, Crossing, Field};
use serde::Serialize;

/// Shape of the field a command ran against.
#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub domain: Domain,
    pub interval: Vector,
    pub dims: (usize, usize),
    pub boundary_x: BoundaryBehavior,
    pub boundary_y: BoundaryBehavior,
    pub value_range: Option<(f64, f64)>,
}

impl FieldSummary {
    pub fn of(field: &Field) -> Self {
        Self {
            domain: field.domain(),
            interval: field.interval(),
            dims: field.dims(),
            boundary_x: field.behavior(Axis::X),
            boundary_y: field.behavior(Axis::Y),
            value_range: field.value_range(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContourReport {
    pub field: FieldSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segment_length: Option<f64>,
    pub contours: Vec<ContourSet>,
}

#[derive(Debug, Serialize)]
pub struct Orbit {
    pub center: Point,
    pub radius: f64,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Serialize)]
pub struct CrossingReport {
    pub field: FieldSummary,
    pub orbit: Orbit,
    pub target: f64,
    pub expected_count: usize,
    pub crossings: Vec<Crossing>,
}
