//! Coordinate projection: grid position to schematic-sheet and board
//! coordinates.
//!
//! Both systems use a fixed pitch per axis. Schematic coordinates page
//! into fixed-size sheets (schematic capture paginates, board layout
//! does not). All arithmetic is integer fixed-point: milliunits in, mils
//! and nanometres out.

use crate::constants::{
    BOARD_ORIGIN_X_NM, BOARD_ORIGIN_Y_NM, MU_PER_UNIT, NM_PER_MU, ROWS_PER_SHEET,
    SCH_ORIGIN_X_MILS, SCH_ORIGIN_Y_MILS, SCH_X_MILS_PER_UNIT, SCH_Y_MILS_PER_UNIT,
};
use crate::models::{BoardPoint, PlacedKey, SchematicPoint};

/// Projects a placed key's centre into schematic and board space.
#[must_use]
pub fn project(placed: &PlacedKey) -> (SchematicPoint, BoardPoint) {
    let x_mu = placed.key.center_x.raw();
    let y_mu = placed.key.center_y.raw();

    // Sheet paging by assigned row, truncating division.
    let sheet = usize::from(placed.address.row) / ROWS_PER_SHEET;
    let sheet_origin_mu = (sheet * ROWS_PER_SHEET) as i64 * MU_PER_UNIT;

    let schematic = SchematicPoint {
        sheet: u8::try_from(sheet).unwrap_or(u8::MAX),
        x: SCH_ORIGIN_X_MILS + x_mu * SCH_X_MILS_PER_UNIT / MU_PER_UNIT,
        y: SCH_ORIGIN_Y_MILS + (y_mu - sheet_origin_mu) * SCH_Y_MILS_PER_UNIT / MU_PER_UNIT,
    };

    let board = BoardPoint {
        x: BOARD_ORIGIN_X_NM + x_mu * NM_PER_MU,
        y: BOARD_ORIGIN_Y_NM + y_mu * NM_PER_MU,
    };

    (schematic, board)
}
