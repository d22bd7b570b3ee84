//! Schematic assembly: one rendered file per schematic sheet.

use crate::models::PlacedElement;
use crate::render::templates::{
    schematic_key_unit, schematic_sheet_footer, schematic_sheet_header, ProjectMeta,
    SchematicKeyContext,
};
use crate::render::{OutputKind, RenderedFile};

/// Renders the schematic sheets for the placed elements, in mapper
/// (row-major) order within each sheet.
#[must_use]
pub fn render_schematic(elements: &[PlacedElement], meta: &ProjectMeta) -> Vec<RenderedFile> {
    let sheet_count = elements
        .iter()
        .map(|e| usize::from(e.schematic.sheet) + 1)
        .max()
        .unwrap_or(1);

    (0..sheet_count)
        .map(|sheet| {
            let mut content = schematic_sheet_header(sheet, sheet_count, meta);
            for element in elements
                .iter()
                .filter(|e| usize::from(e.schematic.sheet) == sheet)
            {
                content.push_str(&schematic_key_unit(&SchematicKeyContext {
                    seq: element.seq,
                    x: element.schematic.x,
                    y: element.schematic.y,
                    row: element.address.row,
                    col: element.address.col,
                    width_label: element.footprint.width_label,
                    footprint_id: &element.footprint.identifier(),
                }));
            }
            content.push_str(&schematic_sheet_footer());
            RenderedFile {
                kind: OutputKind::Schematic,
                file_name: sheet_file_name(&meta.name, sheet),
                content,
            }
        })
        .collect()
}

/// File name for a schematic sheet: the first sheet is the project root,
/// later sheets get a numeric suffix.
#[must_use]
pub fn sheet_file_name(project: &str, sheet: usize) -> String {
    if sheet == 0 {
        format!("{project}.sch")
    } else {
        format!("{project}-sheet{}.sch", sheet + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_file_name() {
        assert_eq!(sheet_file_name("demo", 0), "demo.sch");
        assert_eq!(sheet_file_name("demo", 1), "demo-sheet2.sch");
    }
}
