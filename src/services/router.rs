//! Localized routing heuristic: per-key trace stubs toward the rail nets.
//!
//! For each key this emits exactly two segments: switch pad to the
//! column rail stub (front copper, clipped at the bottom edge of the
//! key's footprint bounding box) and diode pad to the row rail stub
//! (back copper, clipped at the left edge). Chaining the stubs of
//! adjacent keys into complete rails is left to manual completion in
//! the CAD tool.

use crate::constants::{DIODE_PAD_ROW_OFFSET_NM, SWITCH_PAD_COL_OFFSET_NM};
use crate::models::{PlacedElement, TraceLayer, TraceSegment};

/// Derives the per-key trace segments connecting the switch and diode
/// pads to their rail stubs.
#[must_use]
pub fn route(element: &PlacedElement) -> Vec<TraceSegment> {
    let (min_x, _, _, max_y) = element.bounding_box_nm();

    // Column stub: straight down from the switch pad to the bottom edge.
    let col_start = element
        .board
        .offset(SWITCH_PAD_COL_OFFSET_NM.0, SWITCH_PAD_COL_OFFSET_NM.1);
    let col_stub = TraceSegment {
        start: col_start,
        end: crate::models::BoardPoint {
            x: col_start.x,
            y: max_y,
        },
        net: element.col_net,
        layer: TraceLayer::FrontCu,
    };

    // Row stub: straight left from the diode's row pad to the left edge.
    let row_start = element
        .board
        .offset(DIODE_PAD_ROW_OFFSET_NM.0, DIODE_PAD_ROW_OFFSET_NM.1);
    let row_stub = TraceSegment {
        start: row_start,
        end: crate::models::BoardPoint {
            x: min_x,
            y: row_start.y,
        },
        net: element.row_net,
        layer: TraceLayer::BackCu,
    };

    vec![col_stub, row_stub]
}
