//! Fixed geometry and bounds constants for the layout compiler.
//!
//! All board-space constants are expressed in nanometres (the PCB format's
//! native grid) and all schematic-space constants in mils, so every
//! projection stays in integer arithmetic.

/// The binary name of the application (used in generated comments).
pub const APP_NAME: &str = "matrixpcb";

/// Maximum number of switch-matrix rows a layout may map to.
pub const MAX_ROWS: usize = 7;

/// Maximum number of switch-matrix columns in any row.
pub const MAX_COLS: usize = 18;

/// Milliunits per key-unit (1u). Grid positions are stored in milliunits.
pub const MU_PER_UNIT: i64 = 1000;

/// Nanometres per milliunit: one key pitch (19.05 mm) divided by 1000.
pub const NM_PER_MU: i64 = 19_050;

/// Key pitch in nanometres (19.05 mm, MX spacing).
pub const KEY_PITCH_NM: i64 = 19_050_000;

/// Board-space X origin in nanometres (-100 mm).
pub const BOARD_ORIGIN_X_NM: i64 = -100_000_000;

/// Board-space Y origin in nanometres (17.78 mm).
pub const BOARD_ORIGIN_Y_NM: i64 = 17_780_000;

/// Schematic X origin in mils.
pub const SCH_ORIGIN_X_MILS: i64 = 600;

/// Schematic Y origin in mils, relative to the owning sheet.
pub const SCH_ORIGIN_Y_MILS: i64 = 800;

/// Schematic X advance in mils per key-unit.
pub const SCH_X_MILS_PER_UNIT: i64 = 800;

/// Schematic Y advance in mils per key-unit.
pub const SCH_Y_MILS_PER_UNIT: i64 = 500;

/// Matrix rows placed on one schematic sheet before paging to the next.
pub const ROWS_PER_SHEET: usize = 4;

/// Switch pad feeding the column rail, relative to the key centre (nm).
pub const SWITCH_PAD_COL_OFFSET_NM: (i64, i64) = (0, -2_030_000);

/// Switch pad feeding the per-key diode net, relative to the key centre (nm).
pub const SWITCH_PAD_DIODE_OFFSET_NM: (i64, i64) = (-6_350_000, 2_540_000);

/// Diode footprint centre, relative to the key centre (nm).
pub const DIODE_CENTER_OFFSET_NM: (i64, i64) = (-6_350_000, 7_620_000);

/// Diode pad on the per-key diode net, relative to the key centre (nm).
pub const DIODE_PAD_LINK_OFFSET_NM: (i64, i64) = (-6_350_000, 6_350_000);

/// Diode pad feeding the row rail, relative to the key centre (nm).
pub const DIODE_PAD_ROW_OFFSET_NM: (i64, i64) = (-6_350_000, 8_890_000);

/// Clearance between the outermost key footprints and the board outline (nm).
pub const OUTLINE_MARGIN_NM: i64 = 1_270_000;

/// Inset of the corner mounting holes from the board outline (nm).
pub const MOUNT_HOLE_INSET_NM: i64 = 3_810_000;
