//! Footprint resolution: choosing the switch footprint width and the
//! stabilizer variant for a key from its width.
//!
//! Both decisions are ordered threshold tables evaluated most specific
//! first, so 6.25u wins over 6u which wins over 2u. Resolution never
//! fails: widths without an exact match degrade and are surfaced as
//! warnings to the caller.

use std::fmt;

use crate::models::{FootprintSpec, Key, Milliunits, StabilizerVariant};

/// Available switch footprint widths, as `(upper bound exclusive,
/// label, exact width)` in milliunits, scanned in order. The final entry
/// is the catch-all for everything at or above 6.25u.
const WIDTH_LADDER: [(i64, &str, i64); 8] = [
    (1250, "1.00", 1000),
    (1500, "1.25", 1250),
    (1750, "1.50", 1500),
    (2000, "1.75", 1750),
    (2250, "2.00", 2000),
    (2750, "2.25", 2250),
    (6250, "2.75", 2750),
    (i64::MAX, "6.25", 6250),
];

/// Stabilizer variants by exact key width in milliunits, most specific
/// (widest) first.
const STABILIZER_TABLE: [(i64, StabilizerVariant); 5] = [
    (7000, StabilizerVariant::U7),
    (6250, StabilizerVariant::U625),
    (6000, StabilizerVariant::U6),
    (3000, StabilizerVariant::U3),
    (2000, StabilizerVariant::U2),
];

/// Width below which no key needs a stabilizer.
const STABILIZER_MIN_WIDTH: i64 = 2000;

/// Non-fatal resolution diagnostics, collected and surfaced to the
/// caller alongside successful output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The key width has no footprint of its own; a narrower footprint
    /// was substituted.
    DegradedFootprintWidth {
        /// Key sequence number.
        key: usize,
        /// The key's width.
        width: Milliunits,
        /// Width label of the substituted footprint.
        chosen: &'static str,
    },
    /// The key is wide enough to need a stabilizer but matches no known
    /// variant; it is placed without one.
    NoStabilizerVariant {
        /// Key sequence number.
        key: usize,
        /// The key's width.
        width: Milliunits,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegradedFootprintWidth { key, width, chosen } => write!(
                f,
                "key {key}: no {width}u footprint available, using {chosen}u"
            ),
            Self::NoStabilizerVariant { key, width } => write!(
                f,
                "key {key}: no stabilizer variant for {width}u, placing without one"
            ),
        }
    }
}

/// Resolves the mechanical footprint for a key from its width.
///
/// Never fails; degraded choices are reported through `warnings`.
pub fn resolve(key: &Key, warnings: &mut Vec<Warning>) -> FootprintSpec {
    let width = key.width.raw();

    let (_, width_label, exact_mu) = WIDTH_LADDER
        .iter()
        .find(|(bound, _, _)| width < *bound)
        .copied()
        .unwrap_or(WIDTH_LADDER[WIDTH_LADDER.len() - 1]);
    let exact_width = width == exact_mu;
    if !exact_width {
        warnings.push(Warning::DegradedFootprintWidth {
            key: key.num,
            width: key.width,
            chosen: width_label,
        });
    }

    let stabilizer = STABILIZER_TABLE
        .iter()
        .find(|(stab_width, _)| width == *stab_width)
        .map(|(_, variant)| *variant);
    if stabilizer.is_none() && width >= STABILIZER_MIN_WIDTH {
        warnings.push(Warning::NoStabilizerVariant {
            key: key.num,
            width: key.width,
        });
    }

    FootprintSpec {
        width_label,
        exact_width,
        stabilizer,
    }
}
