//! OCR records as received from the engine, and the typed tokens built from them.

use crate::core::errors::NumericParseError;
use crate::processors::{BoundingBox, RawNumber, parse_ocr_int};
use serde::{Deserialize, Serialize};

/// One record of OCR engine output, before any filtering.
///
/// The box is `[left, top, width, height]`. Numbers are kept as reported so that
/// malformed values can be handled by the configured coercion policy.
///
/// ```rust
/// use form_layout::domain::RawOcrRecord;
///
/// let record: RawOcrRecord = serde_json::from_str(
///     r#"{"text": "Name", "box": [10, "10", 40, 20], "confidence": "91.3"}"#,
/// ).unwrap();
/// assert_eq!(record.text, "Name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOcrRecord {
    /// Recognized text, possibly surrounded by whitespace or empty.
    pub text: String,
    /// `[left, top, width, height]` in image pixels.
    #[serde(rename = "box")]
    pub bbox: [RawNumber; 4],
    /// Engine confidence on a 0–100 scale; `None` when the engine reported nothing.
    #[serde(default)]
    pub confidence: Option<RawNumber>,
}

impl RawOcrRecord {
    /// Creates a well-formed record.
    pub fn new(text: impl Into<String>, bbox: (i32, i32, i32, i32), confidence: i32) -> Self {
        let (x, y, width, height) = bbox;
        Self {
            text: text.into(),
            bbox: [x.into(), y.into(), width.into(), height.into()],
            confidence: Some(confidence.into()),
        }
    }

    /// Creates a record from raw, unparsed values.
    pub fn from_raw(
        text: impl Into<String>,
        bbox: [RawNumber; 4],
        confidence: Option<RawNumber>,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }

    /// Parses the box. Any malformed coordinate makes the whole box unusable, as does
    /// a right or bottom edge outside the `i32` pixel space.
    pub fn parse_box(&self) -> Result<BoundingBox, NumericParseError> {
        let [x, y, width, height] = &self.bbox;
        let bbox = BoundingBox::new(
            parse_ocr_int(x)?,
            parse_ocr_int(y)?,
            parse_ocr_int(width)?,
            parse_ocr_int(height)?,
        );
        check_edge(bbox.x, bbox.width)?;
        check_edge(bbox.y, bbox.height)?;
        Ok(bbox)
    }
}

fn check_edge(origin: i32, extent: i32) -> Result<(), NumericParseError> {
    match origin.checked_add(extent) {
        Some(_) => Ok(()),
        None => Err(NumericParseError::OutOfRange {
            value: origin as f64 + extent as f64,
        }),
    }
}

/// A token that passed every gate of the token filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    /// Trimmed, non-empty text.
    pub text: String,
    /// Token box in image pixels.
    pub bbox: BoundingBox,
    /// Parsed confidence (0–100).
    pub confidence: i32,
}

impl TextToken {
    /// Creates a token from already trimmed text and a parsed box.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: i32) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_box_from_mixed_values() {
        let record = RawOcrRecord::from_raw(
            "Date",
            ["12".into(), RawNumber::Int(40), RawNumber::Float(33.9), "18".into()],
            None,
        );
        assert_eq!(record.parse_box(), Ok(BoundingBox::new(12, 40, 33, 18)));
    }

    #[test]
    fn test_parse_box_rejects_any_malformed_coordinate() {
        let record = RawOcrRecord::from_raw(
            "Date",
            ["12".into(), "".into(), "30".into(), "18".into()],
            Some("90".into()),
        );
        assert_eq!(record.parse_box(), Err(NumericParseError::Empty));
    }

    #[test]
    fn test_parse_box_rejects_edge_past_pixel_space() {
        let record = RawOcrRecord::new("Name", (100, 100, i32::MAX, 20), 90);
        assert_eq!(
            record.parse_box(),
            Err(NumericParseError::OutOfRange {
                value: 100.0 + i32::MAX as f64
            })
        );

        let record = RawOcrRecord::new("Name", (100, i32::MIN + 10, 40, -20), 90);
        assert!(matches!(
            record.parse_box(),
            Err(NumericParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_record_json_without_confidence() {
        let record: RawOcrRecord =
            serde_json::from_str(r#"{"text": "x", "box": [1, 2, 3, 4]}"#).unwrap();
        assert_eq!(record.confidence, None);
        assert_eq!(record.parse_box(), Ok(BoundingBox::new(1, 2, 3, 4)));
    }
}
