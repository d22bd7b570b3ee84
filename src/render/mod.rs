//! Template rendering: mapping fully-resolved pipeline data into the
//! external CAD text formats.
//!
//! Template selection is purely data-driven (element kind plus
//! stabilizer presence); output ordering follows the matrix mapper's
//! row-major order, so identical input always renders byte-identical
//! output.

pub mod board;
pub mod schematic;
pub mod templates;

pub use templates::ProjectMeta;

use crate::models::{NetTable, PlacedElement, TraceSegment};

/// What kind of output a rendered block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A schematic sheet.
    Schematic,
    /// The board layout.
    Board,
    /// The project file tying the package together.
    Project,
}

/// One rendered text block, destined for a named file in the output
/// package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Output classification.
    pub kind: OutputKind,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Complete file content.
    pub content: String,
}

/// Renders the complete design package: schematic sheets, the board
/// layout, and the project stub, in that order.
#[must_use]
pub fn render(
    elements: &[PlacedElement],
    traces: &[TraceSegment],
    nets: &NetTable,
    meta: &ProjectMeta,
) -> Vec<RenderedFile> {
    let mut files = schematic::render_schematic(elements, meta);
    files.push(board::render_board(elements, traces, nets, meta));
    files.push(RenderedFile {
        kind: OutputKind::Project,
        file_name: format!("{}.pro", meta.name),
        content: templates::project_stub(meta),
    });
    files
}
