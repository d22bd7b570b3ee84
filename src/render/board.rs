//! Board assembly: the single PCB layout file.
//!
//! Modules, holes, traces, and the outline are emitted in mapper order
//! so that two runs over identical input produce byte-identical output.

use crate::constants::{
    DIODE_PAD_LINK_OFFSET_NM, MOUNT_HOLE_INSET_NM, OUTLINE_MARGIN_NM, SWITCH_PAD_DIODE_OFFSET_NM,
};
use crate::models::{
    BoardPoint, NetTable, PlacedElement, TraceLayer, TraceSegment,
};
use crate::render::templates::{
    board_footer, board_header, board_key_unit, board_nets, board_outline, board_trace, board_via,
    escape_text, mounting_hole, stabilizer_holes, BoardKeyContext, ProjectMeta,
};
use crate::render::{OutputKind, RenderedFile};

/// Renders the board layout file.
#[must_use]
pub fn render_board(
    elements: &[PlacedElement],
    traces: &[TraceSegment],
    nets: &NetTable,
    meta: &ProjectMeta,
) -> RenderedFile {
    let mut content = board_header(nets.len());
    content.push_str(&board_nets(nets));
    content.push('\n');

    let net_name = |id| nets.name(id).unwrap_or("").to_string();

    for element in elements {
        content.push_str(&board_key_unit(&BoardKeyContext {
            seq: element.seq,
            at: element.board,
            row: element.address.row,
            col: element.address.col,
            width_label: element.footprint.width_label,
            footprint_id: &element.footprint.identifier(),
            legend: escape_text(element.key.legend.as_deref().unwrap_or("")),
            col_net: (element.col_net.number(), net_name(element.col_net)),
            row_net: (element.row_net.number(), net_name(element.row_net)),
            diode_net: (element.diode_net.number(), net_name(element.diode_net)),
        }));

        if let Some(variant) = element.footprint.stabilizer {
            content.push_str(&stabilizer_holes(element.seq, element.board, variant));
        }

        if meta.routing {
            // Local switch-to-diode link on the per-key net.
            content.push_str(&board_trace(&TraceSegment {
                start: element
                    .board
                    .offset(SWITCH_PAD_DIODE_OFFSET_NM.0, SWITCH_PAD_DIODE_OFFSET_NM.1),
                end: element
                    .board
                    .offset(DIODE_PAD_LINK_OFFSET_NM.0, DIODE_PAD_LINK_OFFSET_NM.1),
                net: element.diode_net,
                layer: TraceLayer::BackCu,
            }));
        }
    }

    if meta.routing {
        // Rail stubs from the router, with a layer-transition via at the
        // clipped end of each stub.
        for segment in traces {
            content.push_str(&board_trace(segment));
            content.push_str(&board_via(segment.end, segment.net));
        }
    }

    if let Some((min, max)) = board_bounds(elements) {
        for (index, corner) in mounting_hole_positions(min, max).into_iter().enumerate() {
            content.push_str(&mounting_hole(index, corner));
        }
        content.push_str(&board_outline(min, max));
    }

    content.push_str(&board_footer());
    RenderedFile {
        kind: OutputKind::Board,
        file_name: format!("{}.kicad_pcb", meta.name),
        content,
    }
}

/// The board outline rectangle: the union of all footprint bounding
/// boxes plus a fixed margin. `None` for an empty layout.
#[must_use]
pub fn board_bounds(elements: &[PlacedElement]) -> Option<(BoardPoint, BoardPoint)> {
    let mut boxes = elements.iter().map(PlacedElement::bounding_box_nm);
    let first = boxes.next()?;
    let (min_x, min_y, max_x, max_y) = boxes.fold(first, |acc, bb| {
        (
            acc.0.min(bb.0),
            acc.1.min(bb.1),
            acc.2.max(bb.2),
            acc.3.max(bb.3),
        )
    });
    Some((
        BoardPoint {
            x: min_x - OUTLINE_MARGIN_NM,
            y: min_y - OUTLINE_MARGIN_NM,
        },
        BoardPoint {
            x: max_x + OUTLINE_MARGIN_NM,
            y: max_y + OUTLINE_MARGIN_NM,
        },
    ))
}

/// One mounting hole per outline corner, inset toward the board centre.
fn mounting_hole_positions(min: BoardPoint, max: BoardPoint) -> [BoardPoint; 4] {
    let inset = MOUNT_HOLE_INSET_NM;
    [
        BoardPoint {
            x: min.x + inset,
            y: min.y + inset,
        },
        BoardPoint {
            x: max.x - inset,
            y: min.y + inset,
        },
        BoardPoint {
            x: max.x - inset,
            y: max.y - inset,
        },
        BoardPoint {
            x: min.x + inset,
            y: max.y - inset,
        },
    ]
}
