//! Column-oriented OCR output.
//!
//! Some engines return one array per attribute (`text`, `left`, `top`, ...) instead
//! of one object per token, e.g. the dictionary produced by
//! `pytesseract.image_to_data(..., output_type=Output.DICT)` serialized to JSON.

use super::OcrOutputAdapter;
use crate::core::errors::FormResult;
use crate::core::validation::validate_same_length;
use crate::domain::RawOcrRecord;
use crate::processors::RawNumber;
use serde::{Deserialize, Serialize};

/// Parallel arrays of OCR output, one entry per token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrColumns {
    pub text: Vec<String>,
    pub left: Vec<RawNumber>,
    pub top: Vec<RawNumber>,
    pub width: Vec<RawNumber>,
    pub height: Vec<RawNumber>,
    /// Confidence per token; entries may be `null`.
    pub conf: Vec<Option<RawNumber>>,
}

impl OcrColumns {
    /// Zips the columns into records. Every column must have as many entries as `text`.
    pub fn into_records(self) -> FormResult<Vec<RawOcrRecord>> {
        let count = self.text.len();
        validate_same_length(count, self.left.len(), "left")?;
        validate_same_length(count, self.top.len(), "top")?;
        validate_same_length(count, self.width.len(), "width")?;
        validate_same_length(count, self.height.len(), "height")?;
        validate_same_length(count, self.conf.len(), "conf")?;

        let records = self
            .text
            .into_iter()
            .zip(self.left)
            .zip(self.top)
            .zip(self.width)
            .zip(self.height)
            .zip(self.conf)
            .map(|(((((text, left), top), width), height), conf)| {
                RawOcrRecord::from_raw(text, [left, top, width, height], conf)
            })
            .collect();
        Ok(records)
    }
}

/// Adapter for JSON documents shaped like [`OcrColumns`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnsJsonAdapter;

impl OcrOutputAdapter for ColumnsJsonAdapter {
    fn name(&self) -> &str {
        "ColumnsJsonAdapter"
    }

    fn parse(&self, input: &str) -> FormResult<Vec<RawOcrRecord>> {
        let columns: OcrColumns = serde_json::from_str(input)?;
        columns.into_records()
    }
}

/// Adapter for a JSON array of [`RawOcrRecord`] objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordsJsonAdapter;

impl OcrOutputAdapter for RecordsJsonAdapter {
    fn name(&self) -> &str {
        "RecordsJsonAdapter"
    }

    fn parse(&self, input: &str) -> FormResult<Vec<RawOcrRecord>> {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::FormError;
    use crate::processors::BoundingBox;

    #[test]
    fn test_columns_zip_into_records() {
        let input = r#"{
            "text": ["", "Name", "John"],
            "left": [0, 10, 120],
            "top": [0, "10", 10],
            "width": [200, 40, 40],
            "height": [100, 20, 20],
            "conf": ["-1", 90, null]
        }"#;
        let records = ColumnsJsonAdapter.parse(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].text, "Name");
        assert_eq!(records[1].parse_box(), Ok(BoundingBox::new(10, 10, 40, 20)));
        assert_eq!(records[2].confidence, None);
    }

    #[test]
    fn test_mismatched_columns_are_rejected() {
        let columns = OcrColumns {
            text: vec!["a".to_string(), "b".to_string()],
            left: vec![1.into(), 2.into()],
            top: vec![1.into(), 2.into()],
            width: vec![1.into(), 2.into()],
            height: vec![1.into()],
            conf: vec![Some(90.into()), Some(90.into())],
        };
        let err = columns.into_records().unwrap_err();
        assert!(matches!(err, FormError::InvalidInput { .. }));
    }

    #[test]
    fn test_records_adapter_reads_array() {
        let input = r#"[{"text": "Name", "box": [10, 10, 40, 20], "confidence": 90}]"#;
        let records = RecordsJsonAdapter.parse(input).unwrap();
        assert_eq!(records, vec![RawOcrRecord::new("Name", (10, 10, 40, 20), 90)]);
    }
}
