//! Tesseract TSV Adapter
//!
//! Reads the tab-separated output of `tesseract <image> <base> tsv`, the same table
//! `pytesseract.image_to_data` returns. Columns are located by header name, numeric
//! columns are kept as raw text so the coercion policy decides how to read them.

use super::OcrOutputAdapter;
use crate::core::errors::{FormError, FormResult};
use crate::domain::RawOcrRecord;
use crate::processors::RawNumber;

const REQUIRED_COLUMNS: [&str; 6] = ["left", "top", "width", "height", "conf", "text"];

/// Adapter for Tesseract TSV output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TesseractTsvAdapter;

/// Positions of the columns the adapter reads.
#[derive(Debug)]
struct ColumnIndex {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
    conf: usize,
    text: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> FormResult<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|column| *column == name)
                .ok_or_else(|| FormError::Parse {
                    line: 1,
                    message: format!("missing column '{}' in TSV header", name),
                })
        };

        let index = Self {
            left: find(REQUIRED_COLUMNS[0])?,
            top: find(REQUIRED_COLUMNS[1])?,
            width: find(REQUIRED_COLUMNS[2])?,
            height: find(REQUIRED_COLUMNS[3])?,
            conf: find(REQUIRED_COLUMNS[4])?,
            text: find(REQUIRED_COLUMNS[5])?,
        };
        Ok(index)
    }

    /// Highest numeric column index; rows must reach it.
    fn last_numeric(&self) -> usize {
        self.left
            .max(self.top)
            .max(self.width)
            .max(self.height)
            .max(self.conf)
    }
}

impl TesseractTsvAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl OcrOutputAdapter for TesseractTsvAdapter {
    fn name(&self) -> &str {
        "TesseractTsvAdapter"
    }

    fn parse(&self, input: &str) -> FormResult<Vec<RawOcrRecord>> {
        let mut lines = input.lines().enumerate();
        let header = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => break line,
                None => return Ok(Vec::new()),
            }
        };
        let columns = ColumnIndex::from_header(header)?;

        let mut records = Vec::new();
        for (line_index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').collect();
            if cells.len() <= columns.last_numeric() {
                return Err(FormError::Parse {
                    line: line_index + 1,
                    message: format!(
                        "expected at least {} columns, found {}",
                        columns.last_numeric() + 1,
                        cells.len()
                    ),
                });
            }

            // Structural rows (page, block, paragraph, line) end right after `conf`.
            let text = cells.get(columns.text).copied().unwrap_or_default();
            let raw = |index: usize| RawNumber::Text(cells[index].to_string());
            records.push(RawOcrRecord::from_raw(
                text,
                [
                    raw(columns.left),
                    raw(columns.top),
                    raw(columns.width),
                    raw(columns.height),
                ],
                Some(raw(columns.conf)),
            ));
        }

        tracing::debug!("Parsed {} TSV rows", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::BoundingBox;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t1275\t1650\t-1\t
5\t1\t1\t1\t1\t1\t96\t120\t58\t21\t96.58\tName:
5\t1\t1\t1\t1\t2\t410\t121\t61\t20\t91\tDate:
";

    #[test]
    fn test_parses_word_and_structural_rows() {
        let records = TesseractTsvAdapter::new().parse(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].text, "");
        assert_eq!(records[0].confidence, Some(RawNumber::Text("-1".to_string())));

        assert_eq!(records[1].text, "Name:");
        assert_eq!(records[1].parse_box(), Ok(BoundingBox::new(96, 120, 58, 21)));
        assert_eq!(records[2].text, "Date:");
    }

    #[test]
    fn test_missing_header_column_is_an_error() {
        let err = TesseractTsvAdapter::new()
            .parse("left\ttop\twidth\theight\ttext\n1\t2\t3\t4\tx\n")
            .unwrap_err();
        assert!(matches!(err, FormError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_short_row_reports_line_number() {
        let input = "left\ttop\twidth\theight\tconf\ttext\n1\t2\t3\t4\t90\tok\n1\t2\n";
        let err = TesseractTsvAdapter::new().parse(input).unwrap_err();
        assert!(matches!(err, FormError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(TesseractTsvAdapter::new().parse("").unwrap().is_empty());
    }
}
