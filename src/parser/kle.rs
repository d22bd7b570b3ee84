//! KLE (keyboard-layout-editor.com) layout decoding.
//!
//! This module turns the raw grid-of-rows JSON into an ordered sequence
//! of normalized [`Key`] records. The input is an array of rows; each row
//! is an array of entries that are either a modifier object (affecting
//! only the next key) or a string key label. A metadata object may appear
//! amongst the rows and supplies the layout name and author.
//!
//! Decoding maintains a cursor in key-units: each row resets `x` to 0 and
//! advances `y` by one unit; `x`/`y` modifier fields displace the cursor,
//! `w`/`h` set the next key's size and reset after that key is emitted.
//! The emitted position is the *centre* of the key.

use serde_json::Value;
use thiserror::Error;

use crate::models::{Key, KleLayout, Milliunits};

/// Modifier fields that would rotate the key. Rotated keys are rejected,
/// never silently placed.
const ROTATION_FIELDS: [&str; 3] = ["r", "rx", "ry"];

/// Modifier fields describing a secondary key rectangle (ISO enter and
/// friends). Unsupported, rejected at decode time.
const SECONDARY_FIELDS: [&str; 4] = ["x2", "y2", "w2", "h2"];

/// Errors produced while decoding a raw layout.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a layout grid at all.
    #[error("malformed layout: {0}")]
    Malformed(String),

    /// A modifier carried a non-numeric or out-of-range value.
    #[error("malformed modifier: field '{field}' of key {key} is not a usable number")]
    BadModifier {
        /// The offending modifier field name.
        field: String,
        /// Sequence number the next key would have had.
        key: usize,
    },

    /// The layout uses a feature this compiler deliberately does not
    /// implement (rotation, non-unit height, secondary dimensions).
    #[error("unsupported layout feature: {0}")]
    Unsupported(String),
}

/// Cursor state carried through the decode fold, in milliunits.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: Milliunits,
    y: Milliunits,
}

/// Size pending for the next key only; consumed exactly once.
#[derive(Debug, Clone, Copy)]
struct PendingSize {
    width: Milliunits,
    height: Milliunits,
}

impl PendingSize {
    const fn default_1u() -> Self {
        Self {
            width: Milliunits::ONE,
            height: Milliunits::ONE,
        }
    }
}

/// Decodes a raw layout source string into a [`KleLayout`].
///
/// Accepts the strict JSON download format as well as the relaxed JSON5
/// "raw data" paste format (unquoted object keys, with or without the
/// outer array brackets).
///
/// # Errors
///
/// Returns [`DecodeError`] for inputs that are not a layout grid, carry
/// malformed modifiers, or use unsupported features. Decoding is
/// all-or-nothing; no partial layout is produced.
pub fn decode(source: &str) -> Result<KleLayout, DecodeError> {
    let value = parse_value(source)?;
    let rows = value
        .as_array()
        .ok_or_else(|| DecodeError::Malformed("top level is not an array of rows".to_string()))?;

    let mut layout = KleLayout::default();
    let mut cursor = Cursor {
        x: Milliunits::ZERO,
        y: Milliunits::ZERO,
    };

    for row in rows {
        match row {
            Value::Array(entries) => {
                cursor = decode_row(cursor, entries, &mut layout)?;
            }
            Value::Object(meta) => {
                // Metadata block: name/author feed the title blocks,
                // everything else is ignored.
                if let Some(name) = meta.get("name").and_then(Value::as_str) {
                    layout.name = name.to_string();
                }
                if let Some(author) = meta.get("author").and_then(Value::as_str) {
                    layout.author = author.to_string();
                }
            }
            other => {
                return Err(DecodeError::Malformed(format!(
                    "expected a row array or metadata object, found {other}"
                )))
            }
        }
    }

    Ok(layout)
}

/// Decodes one row of entries, returning the cursor for the next row.
fn decode_row(
    start: Cursor,
    entries: &[Value],
    layout: &mut KleLayout,
) -> Result<Cursor, DecodeError> {
    let mut cursor = start;
    let mut pending = PendingSize::default_1u();

    for entry in entries {
        match entry {
            Value::Object(modifier) => {
                (cursor, pending) = apply_modifier(modifier, cursor, pending, layout.key_count())?;
            }
            Value::String(legend) => {
                let key = Key {
                    num: layout.key_count(),
                    center_x: cursor.x + pending.width.half(),
                    center_y: cursor.y + pending.height.half(),
                    width: pending.width,
                    height: pending.height,
                    legend: if legend.is_empty() {
                        None
                    } else {
                        Some(legend.clone())
                    },
                };
                cursor.x += pending.width;
                pending = PendingSize::default_1u();
                layout.keys.push(key);
            }
            other => {
                return Err(DecodeError::Malformed(format!(
                    "unexpected row entry {other}"
                )))
            }
        }
    }

    // Row end: x resets, y advances one unit.
    Ok(Cursor {
        x: Milliunits::ZERO,
        y: start.y + Milliunits::ONE,
    })
}

/// Applies one modifier object to the cursor and pending size.
fn apply_modifier(
    modifier: &serde_json::Map<String, Value>,
    mut cursor: Cursor,
    mut pending: PendingSize,
    next_key: usize,
) -> Result<(Cursor, PendingSize), DecodeError> {
    for field in ROTATION_FIELDS {
        if modifier.contains_key(field) {
            return Err(DecodeError::Unsupported(format!(
                "key {next_key} is rotated ('{field}'); rotated keys cannot be placed"
            )));
        }
    }
    for field in SECONDARY_FIELDS {
        if modifier.contains_key(field) {
            return Err(DecodeError::Unsupported(format!(
                "key {next_key} has a secondary rectangle ('{field}'); \
                 ISO-style keys cannot be placed"
            )));
        }
    }

    for (field, value) in modifier {
        match field.as_str() {
            "x" => cursor.x += numeric(field, value, next_key)?,
            "y" => cursor.y += numeric(field, value, next_key)?,
            "w" => {
                let width = numeric(field, value, next_key)?;
                if !width.is_positive() {
                    return Err(DecodeError::BadModifier {
                        field: field.clone(),
                        key: next_key,
                    });
                }
                pending.width = width;
            }
            "h" => {
                let height = numeric(field, value, next_key)?;
                if height != Milliunits::ONE {
                    return Err(DecodeError::Unsupported(format!(
                        "key {next_key} has height {height}; only unit-height keys are supported"
                    )));
                }
                pending.height = height;
            }
            // Styling fields (colors, fonts, alignment, profile, ...)
            // carry no geometry and are ignored.
            _ => {}
        }
    }

    Ok((cursor, pending))
}

/// Reads one numeric modifier value in key-units.
fn numeric(field: &str, value: &Value, next_key: usize) -> Result<Milliunits, DecodeError> {
    value
        .as_f64()
        .and_then(Milliunits::from_units_f64)
        .ok_or_else(|| DecodeError::BadModifier {
            field: field.to_string(),
            key: next_key,
        })
}

/// Parses the source as strict JSON first, then as JSON5, then as JSON5
/// with the outer brackets the raw paste format omits.
fn parse_value(source: &str) -> Result<Value, DecodeError> {
    if let Ok(value) = serde_json::from_str::<Value>(source) {
        return Ok(value);
    }
    if let Ok(value) = json5::from_str::<Value>(source) {
        return Ok(value);
    }
    json5::from_str::<Value>(&format!("[{source}]"))
        .map_err(|e| DecodeError::Malformed(format!("input is not a layout grid: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_row() {
        let layout = decode(r#"[["Q", "W", "E"]]"#).unwrap();
        assert_eq!(layout.key_count(), 3);
        // 1u keys: centres at 0.5, 1.5, 2.5 units.
        assert_eq!(layout.keys[0].center_x, Milliunits::from_raw(500));
        assert_eq!(layout.keys[1].center_x, Milliunits::from_raw(1500));
        assert_eq!(layout.keys[2].center_x, Milliunits::from_raw(2500));
        assert!(layout
            .keys
            .iter()
            .all(|k| k.center_y == Milliunits::from_raw(500)));
        assert_eq!(layout.keys[2].legend.as_deref(), Some("E"));
    }

    #[test]
    fn test_decode_width_modifier_applies_once() {
        let layout = decode(r#"[[{"w": 2}, "Shift", "A"]]"#).unwrap();
        assert_eq!(layout.keys[0].width, Milliunits::from_raw(2000));
        assert_eq!(layout.keys[0].center_x, Milliunits::from_raw(1000));
        // The modifier is consumed; the next key is 1u again.
        assert_eq!(layout.keys[1].width, Milliunits::ONE);
        assert_eq!(layout.keys[1].center_x, Milliunits::from_raw(2500));
    }

    #[test]
    fn test_decode_x_offset_moves_cursor() {
        let layout = decode(r#"[["A", {"x": 0.5}, "B"]]"#).unwrap();
        // B starts at x = 1 + 0.5, so its centre is 2.0.
        assert_eq!(layout.keys[1].center_x, Milliunits::from_raw(2000));
    }

    #[test]
    fn test_decode_y_offset_persists() {
        let layout = decode(r#"[["A"], [{"y": 0.25}, "B"]]"#).unwrap();
        assert_eq!(layout.keys[0].center_y, Milliunits::from_raw(500));
        // Row advance (1u) plus the offset: centre at 1.25 + 0.5.
        assert_eq!(layout.keys[1].center_y, Milliunits::from_raw(1750));
    }

    #[test]
    fn test_decode_metadata_block() {
        let layout = decode(
            r#"[{"name": "Sixty", "author": "someone", "notes": "x"}, ["A"]]"#,
        )
        .unwrap();
        assert_eq!(layout.name, "Sixty");
        assert_eq!(layout.author, "someone");
        assert_eq!(layout.key_count(), 1);
    }

    #[test]
    fn test_decode_ignores_styling_fields() {
        let layout = decode(r##"[[{"c": "#777777", "a": 7, "f": 4}, "Esc"]]"##).unwrap();
        assert_eq!(layout.key_count(), 1);
        assert_eq!(layout.keys[0].width, Milliunits::ONE);
    }

    #[test]
    fn test_decode_rejects_rotation() {
        let err = decode(r#"[[{"r": 15}, "A"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(_)));
    }

    #[test]
    fn test_decode_rejects_non_unit_height() {
        let err = decode(r#"[[{"h": 2}, "NumPlus"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(_)));
    }

    #[test]
    fn test_decode_rejects_secondary_rectangle() {
        let err = decode(r#"[[{"w": 1.25, "w2": 1.5, "x2": -0.25}, "Enter"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(_)));
    }

    #[test]
    fn test_decode_rejects_bad_modifier() {
        let err = decode(r#"[[{"w": "wide"}, "A"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::BadModifier { .. }));

        let err = decode(r#"[[{"w": 0}, "A"]]"#).unwrap_err();
        assert!(matches!(err, DecodeError::BadModifier { .. }));
    }

    #[test]
    fn test_decode_rejects_non_grid_input() {
        assert!(matches!(
            decode(r#"{"not": "a grid"}"#),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode(r"[[42]]"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_json5_raw_paste() {
        // The raw paste format: unquoted keys, no outer array.
        let layout = decode(r#"[{w:2},"Tab","Q"],["Caps","A"]"#).unwrap();
        assert_eq!(layout.key_count(), 4);
        assert_eq!(layout.keys[0].width, Milliunits::from_raw(2000));
        assert_eq!(layout.keys[2].center_y, Milliunits::from_raw(1500));
    }

    #[test]
    fn test_decode_empty_legend_is_none() {
        let layout = decode(r#"[[""]]"#).unwrap();
        assert_eq!(layout.keys[0].legend, None);
    }
}
