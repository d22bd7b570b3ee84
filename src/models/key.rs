//! Normalized key records produced by the layout decoder.

use crate::models::units::Milliunits;

/// One physical switch position, normalized from the raw layout grid.
///
/// Positions are the *centre* of the key in key-units (1u = one standard
/// key pitch), accumulated by the decoder's cursor. Sizes default to
/// 1u x 1u; only unit-height keys are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Sequential key number in decode order (0-based).
    pub num: usize,
    /// Centre X position in milliunits.
    pub center_x: Milliunits,
    /// Centre Y position in milliunits.
    pub center_y: Milliunits,
    /// Key width in milliunits (default 1u).
    pub width: Milliunits,
    /// Key height in milliunits (always 1u for supported input).
    pub height: Milliunits,
    /// Key legend, informational only; never used for addressing.
    pub legend: Option<String>,
}

impl Key {
    /// Half the key width in nanometres of board space.
    #[must_use]
    pub const fn half_width_nm(&self) -> i64 {
        self.width.raw() * crate::constants::NM_PER_MU / 2
    }

    /// Half the key height in nanometres of board space.
    #[must_use]
    pub const fn half_height_nm(&self) -> i64 {
        self.height.raw() * crate::constants::NM_PER_MU / 2
    }
}

/// The full ordered grid of key definitions for one keyboard, plus the
/// metadata block the layout format carries alongside the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KleLayout {
    /// Layout name from the metadata block, used in title blocks.
    pub name: String,
    /// Layout author from the metadata block.
    pub author: String,
    /// Keys in decode order (row-major over the input grid).
    pub keys: Vec<Key>,
}

impl KleLayout {
    /// Number of keys in the layout.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents() {
        let key = Key {
            num: 0,
            center_x: Milliunits::from_raw(500),
            center_y: Milliunits::from_raw(500),
            width: Milliunits::from_raw(2000),
            height: Milliunits::ONE,
            legend: None,
        };
        assert_eq!(key.half_width_nm(), 19_050_000);
        assert_eq!(key.half_height_nm(), 9_525_000);
    }
}
