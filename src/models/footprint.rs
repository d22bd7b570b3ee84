//! Resolved mechanical footprint identity for a key.

use std::fmt;

/// Extra mounting-hole pattern required by wide keys, keyed by exact key
/// width. Wire stem spacing follows the common MX stabilizer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StabilizerVariant {
    /// 2u keys (most modifiers, numpad 0).
    U2,
    /// 3u space bars.
    U3,
    /// 6u space bars.
    U6,
    /// 6.25u space bars (the ANSI standard).
    U625,
    /// 7u space bars.
    U7,
}

impl StabilizerVariant {
    /// Distance between the stabilizer wire stems in nanometres.
    #[must_use]
    pub const fn stem_spacing_nm(self) -> i64 {
        match self {
            Self::U2 => 23_876_000,
            Self::U3 => 38_100_000,
            Self::U6 => 95_250_000,
            Self::U625 => 100_000_000,
            Self::U7 => 114_300_000,
        }
    }

    /// Short size label used in footprint identifiers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::U2 => "2u",
            Self::U3 => "3u",
            Self::U6 => "6u",
            Self::U625 => "6.25u",
            Self::U7 => "7u",
        }
    }
}

impl fmt::Display for StabilizerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved mechanical identity for a key: the switch mount plus an
/// optional stabilizer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintSpec {
    /// Width label of the closest available switch footprint (e.g. `"2.00"`).
    pub width_label: &'static str,
    /// Whether the key width matched the footprint width exactly.
    pub exact_width: bool,
    /// Stabilizer variant, when the key width requires one.
    pub stabilizer: Option<StabilizerVariant>,
}

impl FootprintSpec {
    /// The footprint identifier string exposed to templates,
    /// e.g. `SW_MX_2.00u` or `SW_MX_6.25u_Stab6.25u`.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self.stabilizer {
            Some(stab) => format!("SW_MX_{}u_Stab{}", self.width_label, stab.label()),
            None => format!("SW_MX_{}u", self.width_label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let plain = FootprintSpec {
            width_label: "1.00",
            exact_width: true,
            stabilizer: None,
        };
        assert_eq!(plain.identifier(), "SW_MX_1.00u");

        let spacebar = FootprintSpec {
            width_label: "6.25",
            exact_width: true,
            stabilizer: Some(StabilizerVariant::U625),
        };
        assert_eq!(spacebar.identifier(), "SW_MX_6.25u_Stab6.25u");
    }

    #[test]
    fn test_stem_spacing() {
        assert_eq!(StabilizerVariant::U2.stem_spacing_nm(), 23_876_000);
        assert_eq!(StabilizerVariant::U625.stem_spacing_nm(), 100_000_000);
        assert_eq!(StabilizerVariant::U7.stem_spacing_nm(), 114_300_000);
    }
}
