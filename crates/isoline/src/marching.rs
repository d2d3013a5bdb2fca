//! Iso-line extraction using the marching squares algorithm.
//!
//! Every lattice cell is classified by which of its four corners are at or
//! above the target value, and the matching case emits zero, one or two line
//! segments whose endpoints are linearly interpolated along the cell edges.
//! Output is an unordered edge soup; joining it into polylines is left to the
//! caller.
//!
//! Corner naming inside a cell (y grows upward):
//!
//! ```text
//!   c ──── top ──── d
//!   │               │
//!  left           right
//!   │               │
//!   a ─── bottom ── b
//! ```

use geometry::{Point, Segment, Vector};
use sampled_field::{inverse_lerp, Axis, Field};
use tracing::debug;

/// Case bits for corners at or above the level.
const A_ABOVE: u8 = 1;
const B_ABOVE: u8 = 2;
const C_ABOVE: u8 = 4;
const D_ABOVE: u8 = 8;

/// One lattice cell: corner positions and their sample values.
#[derive(Debug, Clone, Copy)]
struct Cell {
    pa: Point,
    pb: Point,
    pc: Point,
    pd: Point,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Cell {
    fn case_index(&self, level: f64) -> u8 {
        let mut index = 0;
        if self.a >= level {
            index |= A_ABOVE;
        }
        if self.b >= level {
            index |= B_ABOVE;
        }
        if self.c >= level {
            index |= C_ABOVE;
        }
        if self.d >= level {
            index |= D_ABOVE;
        }
        index
    }

    fn bottom(&self, level: f64) -> Point {
        inverse_lerp(level, self.pa, self.a, self.pb, self.b)
    }

    fn top(&self, level: f64) -> Point {
        inverse_lerp(level, self.pc, self.c, self.pd, self.d)
    }

    fn left(&self, level: f64) -> Point {
        inverse_lerp(level, self.pa, self.a, self.pc, self.c)
    }

    fn right(&self, level: f64) -> Point {
        inverse_lerp(level, self.pb, self.b, self.pd, self.d)
    }
}

/// Extract the iso-line segments of `field` at `level`.
///
/// Cells with a NaN corner are skipped. On wrapped axes the closing cell
/// between the last stored lattice line and the first is included, so
/// contours run across the seam.
pub fn contour(field: &Field, level: f64) -> Vec<Segment> {
    let (dim_x, dim_y) = field.dims();
    let cells_x = field.cell_count(Axis::X);
    let cells_y = field.cell_count(Axis::Y);
    let interval = field.interval();
    let samples = field.samples();

    let mut segments = Vec::new();
    let mut saddles = 0usize;

    for iy in 0..cells_y {
        let iy1 = (iy + 1) % dim_y;
        for ix in 0..cells_x {
            let ix1 = (ix + 1) % dim_x;

            let a = samples[iy * dim_x + ix];
            let b = samples[iy * dim_x + ix1];
            let c = samples[iy1 * dim_x + ix];
            let d = samples[iy1 * dim_x + ix1];
            if a.is_nan() || b.is_nan() || c.is_nan() || d.is_nan() {
                continue;
            }

            let pa = field.lattice_point(ix, iy);
            let cell = Cell {
                pa,
                pb: pa + Vector::new(interval.x, 0.0),
                pc: pa + Vector::new(0.0, interval.y),
                pd: pa + interval,
                a,
                b,
                c,
                d,
            };

            let index = cell.case_index(level);
            if index == 6 || index == 9 {
                saddles += 1;
            }
            cell_segments(index, &cell, level, &mut segments);
        }
    }

    debug!(
        level,
        cells_x,
        cells_y,
        saddles,
        segments = segments.len(),
        "Extracted contour segments"
    );

    segments
}

/// Append the segments for one classified cell.
fn cell_segments(index: u8, cell: &Cell, level: f64, out: &mut Vec<Segment>) {
    match index {
        0 | 15 => {}
        // a alone
        1 | 14 => out.push(Segment::new(cell.left(level), cell.bottom(level))),
        // b alone
        2 | 13 => out.push(Segment::new(cell.bottom(level), cell.right(level))),
        // c alone
        4 | 11 => out.push(Segment::new(cell.left(level), cell.top(level))),
        // d alone
        8 | 7 => out.push(Segment::new(cell.top(level), cell.right(level))),
        // bottom pair vs top pair
        3 | 12 => out.push(Segment::new(cell.left(level), cell.right(level))),
        // left pair vs right pair
        5 | 10 => out.push(Segment::new(cell.bottom(level), cell.top(level))),
        6 | 9 => {
            let [first, second] = resolve_saddle(cell, level);
            out.push(first);
            out.push(second);
        }
        _ => unreachable!("case index is a 4-bit value"),
    }
}

/// Pick between the two diagonal pairings of a saddle cell.
///
/// Both pairings are consistent with the corner classification. The one with
/// the smaller sum of squared segment lengths wins; ties go to the
/// left-top/right-bottom pairing.
fn resolve_saddle(cell: &Cell, level: f64) -> [Segment; 2] {
    let left = cell.left(level);
    let right = cell.right(level);
    let top = cell.top(level);
    let bottom = cell.bottom(level);

    let cut_top_left = [Segment::new(left, top), Segment::new(right, bottom)];
    let cut_bottom_left = [Segment::new(left, bottom), Segment::new(right, top)];

    let cost = |pair: &[Segment; 2]| pair[0].length_squared() + pair[1].length_squared();
    if cost(&cut_top_left) <= cost(&cut_bottom_left) {
        cut_top_left
    } else {
        cut_bottom_left
    }
}
