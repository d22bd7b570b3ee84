//! Fixed-point length types used across the pipeline.
//!
//! Grid positions and key sizes are stored in milliunits (1/1000 of a
//! key-unit) so that every coordinate projection is exact integer
//! arithmetic, with no floating-point drift across the key range.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::constants::MU_PER_UNIT;

/// A length in milliunits: 1/1000 of a standard key pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Milliunits(i64);

impl Milliunits {
    /// Zero length.
    pub const ZERO: Self = Self(0);

    /// One key-unit (1u).
    pub const ONE: Self = Self(MU_PER_UNIT);

    /// Wraps a raw milliunit count.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw milliunit count.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Converts a key-unit value as found in layout JSON (e.g. `6.25`).
    ///
    /// Returns `None` for non-finite values or values too large to
    /// represent; fractional parts finer than a milliunit are rounded to
    /// the nearest milliunit.
    #[must_use]
    pub fn from_units_f64(units: f64) -> Option<Self> {
        if !units.is_finite() {
            return None;
        }
        let scaled = units * MU_PER_UNIT as f64;
        if scaled.abs() > 1e15 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        Some(Self(scaled.round() as i64))
    }

    /// The value in key-units, for display and warnings only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_units_f64(self) -> f64 {
        self.0 as f64 / MU_PER_UNIT as f64
    }

    /// Half this length, truncating toward zero.
    #[must_use]
    pub const fn half(self) -> Self {
        Self(self.0 / 2)
    }

    /// True for strictly positive lengths.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Milliunits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Milliunits {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Milliunits {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Milliunits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MU_PER_UNIT;
        let frac = (self.0 % MU_PER_UNIT).unsigned_abs();
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let mut digits = format!("{frac:03}");
        while digits.ends_with('0') {
            digits.pop();
        }
        if self.0 < 0 && whole == 0 {
            write!(f, "-0.{digits}")
        } else {
            write!(f, "{whole}.{digits}")
        }
    }
}

/// Formats a nanometre length as millimetres, trimming trailing zeros,
/// matching the PCB format's coordinate syntax (e.g. `19.05`, `-100`).
#[must_use]
pub fn fmt_mm(nm: i64) -> String {
    let sign = if nm < 0 { "-" } else { "" };
    let abs = nm.unsigned_abs();
    let whole = abs / 1_000_000;
    let frac = abs % 1_000_000;
    if frac == 0 {
        return format!("{sign}{whole}");
    }
    let mut digits = format!("{frac:06}");
    while digits.ends_with('0') {
        digits.pop();
    }
    format!("{sign}{whole}.{digits}")
}
