//! Matrix mapping: assigning every key a bounded `(row, col)` electrical
//! address and building the rail net model.
//!
//! Rows are quantized by order of first appearance of distinct centre-Y
//! values; columns are quantized per row. This produces a dense address
//! space even for fractional or irregular physical positions; the
//! original rational positions survive only in the coordinate projector.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::constants::{MAX_COLS, MAX_ROWS};
use crate::models::{KleLayout, MatrixAddress, Milliunits, NetTable, PlacedKey};

/// How keys within a physical row are ordered into matrix columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnGrouping {
    /// Input order, as the grid lists them.
    Sequential,
    /// Left-to-right by centre-X, ties broken by input order.
    #[default]
    Position,
}

/// Errors produced by matrix assignment.
#[derive(Debug, Error)]
pub enum MapError {
    /// The layout needs more matrix rows or columns than the scanning
    /// matrix supports. Fatal; no partial matrix is emitted.
    #[error(
        "layout maps to {rows} rows and up to {cols} columns in a row; \
         the switch matrix supports at most {MAX_ROWS} rows of {MAX_COLS} columns"
    )]
    GridOverflow {
        /// Distinct rows the layout produced.
        rows: usize,
        /// Widest row's column count.
        cols: usize,
    },
}

/// The mapped matrix: keys in row-major render order plus the net table
/// holding the `Row_<n>` / `Col_<n>` rail nets.
#[derive(Debug, Clone)]
pub struct MatrixModel {
    /// Keys with addresses assigned, ordered row-major.
    pub placed: Vec<PlacedKey>,
    /// Net table seeded with the baseline nets and the rail nets, in
    /// order of population.
    pub nets: NetTable,
    /// Number of matrix rows in use.
    pub rows: usize,
    /// Column count of the widest row.
    pub max_cols: usize,
}

/// Assigns every key of `layout` a matrix address within the fixed
/// bounds, producing keys in row-major order.
///
/// # Errors
///
/// Returns [`MapError::GridOverflow`] when the layout quantizes to more
/// than [`MAX_ROWS`] rows or more than [`MAX_COLS`] columns in any row.
pub fn assign(layout: &KleLayout, grouping: ColumnGrouping) -> Result<MatrixModel, MapError> {
    // Quantize rows: first appearance of each distinct centre-Y, in
    // input order.
    let mut row_values: Vec<Milliunits> = Vec::new();
    let mut row_members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

    for (index, key) in layout.keys.iter().enumerate() {
        let row = match row_values.iter().position(|y| *y == key.center_y) {
            Some(row) => row,
            None => {
                row_values.push(key.center_y);
                row_values.len() - 1
            }
        };
        row_members.entry(row).or_default().push(index);
    }

    let rows = row_values.len();
    let max_cols = row_members.values().map(Vec::len).max().unwrap_or(0);
    if rows > MAX_ROWS || max_cols > MAX_COLS {
        return Err(MapError::GridOverflow {
            rows,
            cols: max_cols,
        });
    }

    // Quantize columns within each row, then emit row-major. Rail nets
    // are interned lazily, in order of population.
    let mut nets = NetTable::with_baseline();
    let mut placed = Vec::with_capacity(layout.keys.len());

    for (row, members) in &row_members {
        let mut ordered = members.clone();
        if grouping == ColumnGrouping::Position {
            ordered.sort_by_key(|&index| (layout.keys[index].center_x, index));
        }

        let row_net = nets.intern(&NetTable::row_net_name(u8::try_from(*row).unwrap_or(u8::MAX)));
        for (col, &index) in ordered.iter().enumerate() {
            let address = MatrixAddress {
                row: u8::try_from(*row).unwrap_or(u8::MAX),
                col: u8::try_from(col).unwrap_or(u8::MAX),
            };
            let col_net = nets.intern(&NetTable::col_net_name(address.col));
            placed.push(PlacedKey {
                key: layout.keys[index].clone(),
                address,
                row_net,
                col_net,
            });
        }
    }

    Ok(MatrixModel {
        placed,
        nets,
        rows,
        max_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::kle::decode;

    fn addresses(model: &MatrixModel) -> Vec<(u8, u8)> {
        model
            .placed
            .iter()
            .map(|p| (p.address.row, p.address.col))
            .collect()
    }

    #[test]
    fn test_assign_dense_grid() {
        let layout = decode(r#"[["A", "B"], ["C", "D"]]"#).unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        assert_eq!(addresses(&model), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(model.rows, 2);
        assert_eq!(model.max_cols, 2);
    }

    #[test]
    fn test_assign_fractional_offsets_stay_dense() {
        // Staggered row: the 0.25u offset does not leak into addresses.
        let layout = decode(r#"[["A", "B"], [{"x": 0.25}, "C", "D"]]"#).unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        assert_eq!(addresses(&model), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_assign_offset_row_is_distinct() {
        // A fractional Y offset produces a new matrix row, first
        // appearance order.
        let layout = decode(r#"[["A"], [{"y": 0.5}, "B"]]"#).unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        assert_eq!(addresses(&model), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_assign_wide_key_occupies_one_column() {
        // Row 1 holds a single 2u key spanning both physical columns;
        // it still gets exactly one matrix address.
        let layout = decode(r#"[["A", "B"], [{"w": 2}, "Shift"]]"#).unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        assert_eq!(addresses(&model), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_assign_nets_in_population_order() {
        let layout = decode(r#"[["A", "B"], ["C"]]"#).unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        let names: Vec<&str> = model.nets.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["GND", "VCC", "Row_0", "Col_0", "Col_1", "Row_1"]);
    }

    #[test]
    fn test_assign_addresses_unique() {
        let layout = decode(
            r#"[[{"w": 1.5}, "Tab", "Q", "W"], [{"w": 1.75}, "Caps", "A", "S"]]"#,
        )
        .unwrap();
        let model = assign(&layout, ColumnGrouping::Position).unwrap();
        let mut seen = std::collections::HashSet::new();
        for p in &model.placed {
            assert!(seen.insert((p.address.row, p.address.col)));
        }
    }

    #[test]
    fn test_assign_row_overflow() {
        let rows: Vec<String> = (0..8).map(|_| r#"["K"]"#.to_string()).collect();
        let source = format!("[{}]", rows.join(","));
        let layout = decode(&source).unwrap();
        let err = assign(&layout, ColumnGrouping::Position).unwrap_err();
        let MapError::GridOverflow { rows, cols } = err;
        assert_eq!(rows, 8);
        assert_eq!(cols, 1);
    }

    #[test]
    fn test_assign_col_overflow() {
        let keys: Vec<&str> = std::iter::repeat(r#""K""#).take(19).collect();
        let source = format!("[[{}]]", keys.join(","));
        let layout = decode(&source).unwrap();
        let err = assign(&layout, ColumnGrouping::Position).unwrap_err();
        let MapError::GridOverflow { rows, cols } = err;
        assert_eq!(rows, 1);
        assert_eq!(cols, 19);
    }

    #[test]
    fn test_sequential_grouping_keeps_input_order() {
        // Same row listed right-to-left via explicit offsets: position
        // grouping reorders, sequential keeps input order.
        let layout =
            decode(r#"[[{"x": 2}, "Right", {"x": -4}, "Left"]]"#).unwrap();
        let pos = assign(&layout, ColumnGrouping::Position).unwrap();
        let seq = assign(&layout, ColumnGrouping::Sequential).unwrap();
        // Position: "Left" (centre 0.5) gets column 0.
        assert_eq!(pos.placed[0].key.legend.as_deref(), Some("Left"));
        // Sequential: "Right" was listed first, keeps column 0.
        assert_eq!(seq.placed[0].key.legend.as_deref(), Some("Right"));
    }
}
