//! The layout compiler pipeline: decode, map, resolve, project, route,
//! render.
//!
//! The pipeline is a pure function from input layout text to an ordered
//! set of rendered files plus collected warnings. Input errors and
//! invariant violations abort the whole compilation with no partial
//! output; warnings never do.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{APP_NAME, ROWS_PER_SHEET};
use crate::models::{PlacedElement, TraceSegment};
use crate::parser::kle::{decode, DecodeError};
use crate::render::{render, ProjectMeta, RenderedFile};
use crate::services::footprint::{resolve, Warning};
use crate::services::matrix::{assign, ColumnGrouping, MapError};
use crate::services::{projector, router};

/// Per-run compilation options.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Project base name; drives output file names.
    pub project_name: String,
    /// Emit local traces and vias.
    pub routing: bool,
    /// Column grouping algorithm.
    pub grouping: ColumnGrouping,
    /// Title-block date string. Injected by the caller so that the
    /// pipeline itself stays deterministic.
    pub date: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            project_name: "keyboard".to_string(),
            routing: true,
            grouping: ColumnGrouping::default(),
            date: String::new(),
        }
    }
}

/// Summary figures for a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileStats {
    /// Number of keys placed.
    pub keys: usize,
    /// Matrix rows in use.
    pub rows: usize,
    /// Column count of the widest row.
    pub cols: usize,
    /// Schematic sheets produced.
    pub sheets: usize,
}

/// A successful compilation: rendered files plus collected warnings.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// Rendered files in emission order.
    pub files: Vec<RenderedFile>,
    /// Non-fatal resolution warnings, in detection order.
    pub warnings: Vec<Warning>,
    /// Run summary.
    pub stats: CompileStats,
}

/// Fatal defects detected by post-stage checks. These indicate a
/// compiler bug rather than bad input.
#[derive(Debug, Error)]
pub enum InvariantViolation {
    /// Two keys were assigned the same matrix address.
    #[error("duplicate matrix address ({row}, {col})")]
    DuplicateAddress {
        /// Offending row index.
        row: u8,
        /// Offending column index.
        col: u8,
    },

    /// Two keys with distinct matrix addresses projected to the same
    /// coordinates.
    #[error("keys {first} and {second} project to coincident {system} coordinates")]
    CoincidentCoordinates {
        /// Sequence number of the earlier key.
        first: usize,
        /// Sequence number of the later key.
        second: usize,
        /// Which coordinate system collided.
        system: &'static str,
    },
}

/// Errors that abort a compilation run.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The layout grid could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The layout does not fit the switch matrix.
    #[error(transparent)]
    Map(#[from] MapError),

    /// A pipeline invariant was violated.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Runs the whole pipeline over a raw layout source.
///
/// # Errors
///
/// Returns [`CompileError`] for undecodable input, grid overflow, or an
/// internal invariant violation. On error no output files are produced.
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    let layout = decode(source)?;
    info!(keys = layout.key_count(), "decoded layout grid");

    let model = assign(&layout, options.grouping)?;
    info!(
        rows = model.rows,
        cols = model.max_cols,
        "assigned matrix addresses"
    );

    let mut nets = model.nets;
    let mut warnings = Vec::new();
    let mut elements = Vec::with_capacity(model.placed.len());
    for (seq, placed) in model.placed.iter().enumerate() {
        let footprint = resolve(&placed.key, &mut warnings);
        let (schematic, board) = projector::project(placed);
        let diode_net = nets.intern(&format!("Net-(D{seq}-Pad2)"));
        elements.push(PlacedElement {
            seq,
            key: placed.key.clone(),
            address: placed.address,
            row_net: placed.row_net,
            col_net: placed.col_net,
            diode_net,
            footprint,
            schematic,
            board,
        });
    }
    check_invariants(&elements)?;
    debug!(warnings = warnings.len(), "resolved footprints");

    let traces: Vec<TraceSegment> = elements.iter().flat_map(|e| router::route(e)).collect();

    let meta = ProjectMeta {
        name: options.project_name.clone(),
        title: if layout.name.is_empty() {
            options.project_name.clone()
        } else {
            layout.name.clone()
        },
        author: layout.author.clone(),
        date: options.date.clone(),
        comment: format!("Generated by {} v{}", APP_NAME, env!("CARGO_PKG_VERSION")),
        routing: options.routing,
    };
    let files = render(&elements, &traces, &nets, &meta);
    info!(files = files.len(), "rendered design package");

    let sheets = if model.rows == 0 {
        1
    } else {
        (model.rows - 1) / ROWS_PER_SHEET + 1
    };
    Ok(CompileOutput {
        files,
        warnings,
        stats: CompileStats {
            keys: layout.key_count(),
            rows: model.rows,
            cols: model.max_cols,
            sheets,
        },
    })
}

/// Re-checks the mapper and projector invariants: unique matrix
/// addresses and non-coincident projections.
fn check_invariants(elements: &[PlacedElement]) -> Result<(), InvariantViolation> {
    let mut addresses = HashSet::new();
    let mut schematic_points: HashMap<(u8, i64, i64), usize> = HashMap::new();
    let mut board_points: HashMap<(i64, i64), usize> = HashMap::new();

    for element in elements {
        if !addresses.insert((element.address.row, element.address.col)) {
            return Err(InvariantViolation::DuplicateAddress {
                row: element.address.row,
                col: element.address.col,
            });
        }
        let sch = element.schematic;
        if let Some(&first) = schematic_points.get(&(sch.sheet, sch.x, sch.y)) {
            return Err(InvariantViolation::CoincidentCoordinates {
                first,
                second: element.seq,
                system: "schematic",
            });
        }
        schematic_points.insert((sch.sheet, sch.x, sch.y), element.seq);

        if let Some(&first) = board_points.get(&(element.board.x, element.board.y)) {
            return Err(InvariantViolation::CoincidentCoordinates {
                first,
                second: element.seq,
                system: "board",
            });
        }
        board_points.insert((element.board.x, element.board.y), element.seq);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BoardPoint, FootprintSpec, Key, MatrixAddress, Milliunits, NetTable, SchematicPoint,
    };

    fn element(seq: usize, row: u8, col: u8, x: i64) -> PlacedElement {
        let mut nets = NetTable::new();
        let net = nets.intern("Row_0");
        PlacedElement {
            seq,
            key: Key {
                num: seq,
                center_x: Milliunits::from_raw(x / 19_050),
                center_y: Milliunits::from_raw(500),
                width: Milliunits::ONE,
                height: Milliunits::ONE,
                legend: None,
            },
            address: MatrixAddress { row, col },
            row_net: net,
            col_net: net,
            diode_net: net,
            footprint: FootprintSpec {
                width_label: "1.00",
                exact_width: true,
                stabilizer: None,
            },
            schematic: SchematicPoint {
                sheet: 0,
                x,
                y: 1050,
            },
            board: BoardPoint { x, y: 0 },
        }
    }

    #[test]
    fn test_check_invariants_accepts_distinct() {
        let elements = vec![element(0, 0, 0, 1000), element(1, 0, 1, 1800)];
        assert!(check_invariants(&elements).is_ok());
    }

    #[test]
    fn test_check_invariants_duplicate_address() {
        let elements = vec![element(0, 0, 0, 1000), element(1, 0, 0, 1800)];
        assert!(matches!(
            check_invariants(&elements),
            Err(InvariantViolation::DuplicateAddress { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_check_invariants_coincident_points() {
        let elements = vec![element(0, 0, 0, 1000), element(1, 0, 1, 1000)];
        assert!(matches!(
            check_invariants(&elements),
            Err(InvariantViolation::CoincidentCoordinates {
                first: 0,
                second: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_compile_empty_layout() {
        let output = compile("[]", &CompileOptions::default()).unwrap();
        assert_eq!(output.stats.keys, 0);
        // One (empty) schematic sheet, the board, and the project stub.
        assert_eq!(output.files.len(), 3);
        assert!(output.warnings.is_empty());
    }
}
