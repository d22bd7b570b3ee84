//! Fully-resolved per-key records consumed by the router and renderer.

use crate::models::footprint::FootprintSpec;
use crate::models::key::Key;
use crate::models::matrix::{MatrixAddress, NetId};
use crate::models::units::fmt_mm;

/// Absolute position on a schematic sheet, in mils.
///
/// The schematic coordinate space pages into fixed-size sheets; `x`/`y`
/// are relative to the owning sheet's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchematicPoint {
    /// Sheet index, zero-based.
    pub sheet: u8,
    /// X coordinate in mils.
    pub x: i64,
    /// Y coordinate in mils.
    pub y: i64,
}

/// Absolute position on the board, in nanometres. The board is a single
/// continuous plane; it never paginates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPoint {
    /// X coordinate in nanometres.
    pub x: i64,
    /// Y coordinate in nanometres.
    pub y: i64,
}

impl BoardPoint {
    /// Returns this point displaced by `(dx, dy)` nanometres.
    #[must_use]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// X coordinate formatted as millimetres.
    #[must_use]
    pub fn x_mm(&self) -> String {
        fmt_mm(self.x)
    }

    /// Y coordinate formatted as millimetres.
    #[must_use]
    pub fn y_mm(&self) -> String {
        fmt_mm(self.y)
    }
}

/// Copper layer a trace segment is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLayer {
    /// Front copper; column rails run here.
    FrontCu,
    /// Back copper; row rails and diode links run here.
    BackCu,
}

impl TraceLayer {
    /// Layer name in the board format.
    #[must_use]
    pub const fn kicad_name(self) -> &'static str {
        match self {
            Self::FrontCu => "F.Cu",
            Self::BackCu => "B.Cu",
        }
    }
}

/// One straight copper segment, always local to a single key's footprint
/// bounding box; segments never span between two keys' footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSegment {
    /// Segment start, in board space.
    pub start: BoardPoint,
    /// Segment end, in board space.
    pub end: BoardPoint,
    /// Net the segment belongs to.
    pub net: NetId,
    /// Copper layer.
    pub layer: TraceLayer,
}

/// A key with every pipeline stage's result attached. Immutable once
/// produced by the coordinate projector; the router and renderer consume
/// it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedElement {
    /// Element sequence number (render order, row-major).
    pub seq: usize,
    /// The decoded key.
    pub key: Key,
    /// Assigned matrix address.
    pub address: MatrixAddress,
    /// The key's row rail net.
    pub row_net: NetId,
    /// The key's column rail net.
    pub col_net: NetId,
    /// The per-key switch-to-diode net.
    pub diode_net: NetId,
    /// Resolved mechanical footprint.
    pub footprint: FootprintSpec,
    /// Absolute schematic coordinates.
    pub schematic: SchematicPoint,
    /// Absolute board coordinates of the key centre.
    pub board: BoardPoint,
}

impl PlacedElement {
    /// The footprint bounding box in board space as
    /// `(min_x, min_y, max_x, max_y)` nanometres.
    #[must_use]
    pub const fn bounding_box_nm(&self) -> (i64, i64, i64, i64) {
        let hw = self.key.half_width_nm();
        let hh = self.key.half_height_nm();
        (
            self.board.x - hw,
            self.board.y - hh,
            self.board.x + hw,
            self.board.y + hh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_point_mm() {
        let p = BoardPoint {
            x: -100_000_000,
            y: 27_305_000,
        };
        assert_eq!(p.x_mm(), "-100");
        assert_eq!(p.y_mm(), "27.305");
        let q = p.offset(19_050_000, 0);
        assert_eq!(q.x_mm(), "-80.95");
    }

    #[test]
    fn test_trace_layer_names() {
        assert_eq!(TraceLayer::FrontCu.kicad_name(), "F.Cu");
        assert_eq!(TraceLayer::BackCu.kicad_name(), "B.Cu");
    }
}
