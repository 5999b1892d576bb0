//! Raw numeric values reported by OCR engines and the policy used to read them.
//!
//! OCR engines are loose about numbers: Tesseract's TSV carries every column as text,
//! confidences may be fractional (`"96.58"`) or sentinels (`"-1"`), and JSON exports
//! mix integers, floats, strings and `null`. [`RawNumber`] keeps the value as reported
//! and [`parse_ocr_int`] turns it into a pixel or confidence integer, or a typed error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::errors::NumericParseError;

/// A number as reported by an OCR engine, before interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A textual value, parsed on demand.
    Text(String),
}

impl From<i32> for RawNumber {
    fn from(value: i32) -> Self {
        RawNumber::Int(value as i64)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Float(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawNumber::Int(v) => write!(f, "{v}"),
            RawNumber::Float(v) => write!(f, "{v}"),
            RawNumber::Text(v) => write!(f, "{v:?}"),
        }
    }
}

/// Parses an OCR numeric field into an integer.
///
/// Text is trimmed and read as a decimal number; fractional values are truncated
/// toward zero, so `"96.58"` becomes `96` and `"-1"` stays `-1`.
pub fn parse_ocr_int(raw: &RawNumber) -> Result<i32, NumericParseError> {
    match raw {
        RawNumber::Int(value) => {
            i32::try_from(*value).map_err(|_| NumericParseError::OutOfRange {
                value: *value as f64,
            })
        }
        RawNumber::Float(value) => truncate_to_i32(*value),
        RawNumber::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(NumericParseError::Empty);
            }
            let value: f64 = trimmed
                .parse()
                .map_err(|_| NumericParseError::NotANumber {
                    value: trimmed.to_string(),
                })?;
            truncate_to_i32(value)
        }
    }
}

/// Parses an optional OCR numeric field; `None` is reported as [`NumericParseError::Missing`].
pub fn parse_optional_ocr_int(raw: Option<&RawNumber>) -> Result<i32, NumericParseError> {
    raw.ok_or(NumericParseError::Missing).and_then(parse_ocr_int)
}

fn truncate_to_i32(value: f64) -> Result<i32, NumericParseError> {
    if !value.is_finite() {
        return Err(NumericParseError::NonFinite { value });
    }
    let truncated = value.trunc();
    if truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return Err(NumericParseError::OutOfRange { value });
    }
    Ok(truncated as i32)
}

/// Specifies how a confidence value that fails to parse is treated.
///
/// Bounding boxes have no such policy: a token whose box cannot be read is always
/// dropped, because there is no geometry to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Treat the value as `0`, which the confidence gate then rejects.
    #[default]
    ZeroOnError,
    /// Drop the record without giving it a confidence.
    DropRecord,
}

impl CoercionPolicy {
    /// Applies the policy to a parse result. `None` means the record is dropped.
    pub fn resolve(&self, parsed: Result<i32, NumericParseError>) -> Option<i32> {
        match (self, parsed) {
            (_, Ok(value)) => Some(value),
            (CoercionPolicy::ZeroOnError, Err(_)) => Some(0),
            (CoercionPolicy::DropRecord, Err(_)) => None,
        }
    }
}
