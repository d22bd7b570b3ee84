//! Shared KLE layout fixtures for integration tests.
#![allow(dead_code)] // Not every fixture is used by every test binary

use matrixpcb::services::matrix::ColumnGrouping;
use matrixpcb::CompileOptions;

/// Two rows: two 1u keys, then one 2u key spanning both columns.
pub const TWO_ROW_SCENARIO: &str = r#"[["A", "B"], [{"w": 2}, "Shift"]]"#;

/// A single 6.25u space bar.
pub const SPACEBAR_625: &str = r#"[[{"w": 6.25}, "Space"]]"#;

/// A single 6u space bar (no footprint of its own in the width ladder).
pub const SPACEBAR_6: &str = r#"[[{"w": 6}, "Space"]]"#;

/// A 2.5u key: wide enough for a stabilizer but matching no variant.
pub const UNMATCHED_WIDE: &str = r#"[[{"w": 2.5}, "Fn"]]"#;

/// The top rows of a 60% board with metadata, stagger, and a wide key.
pub const SIXTY_PERCENT_FRAGMENT: &str = r#"[
  {"name": "Sixty", "author": "fixture"},
  ["Esc", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", {"w": 2}, "Backspace"],
  [{"w": 1.5}, "Tab", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]", {"w": 1.5}, "\\"],
  [{"w": 1.75}, "Caps", "A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'", {"w": 2.25}, "Enter"],
  [{"w": 2.25}, "Shift", "Z", "X", "C", "V", "B", "N", "M", ",", ".", "/", {"w": 2.75}, "Shift"]
]"#;

/// Eight single-key rows: one row too many for the matrix.
pub fn eight_rows() -> String {
    let rows: Vec<&str> = std::iter::repeat(r#"["K"]"#).take(8).collect();
    format!("[{}]", rows.join(","))
}

/// Nineteen keys in one row: one column too many for the matrix.
pub fn nineteen_cols() -> String {
    let keys: Vec<&str> = std::iter::repeat(r#""K""#).take(19).collect();
    format!("[[{}]]", keys.join(","))
}

/// A rotated key, which the decoder must reject.
pub const ROTATED: &str = r#"[[{"r": 15, "rx": 2}, "A"]]"#;

/// A 2u-tall key, which the decoder must reject.
pub const TALL: &str = r#"[[{"h": 2}, "NumPlus"]]"#;

/// Deterministic compile options for a named test project.
pub fn options(name: &str) -> CompileOptions {
    CompileOptions {
        project_name: name.to_string(),
        routing: true,
        grouping: ColumnGrouping::Position,
        date: "2024-01-01 00:00".to_string(),
    }
}
