//! Adapters that turn OCR engine output into [`RawOcrRecord`]s.
//!
//! The OCR engine itself is an external collaborator; these adapters only read the
//! formats it produces.

mod columns_adapter;
mod tesseract_tsv_adapter;

pub use columns_adapter::{ColumnsJsonAdapter, OcrColumns, RecordsJsonAdapter};
pub use tesseract_tsv_adapter::TesseractTsvAdapter;

use crate::core::errors::{FormError, FormResult};
use crate::domain::RawOcrRecord;
use std::fmt::Debug;
use std::path::Path;

/// Trait for readers of one OCR output format.
pub trait OcrOutputAdapter: Debug + Send + Sync {
    /// Get the adapter name for debugging
    fn name(&self) -> &str;

    /// Parse a whole document of OCR output.
    fn parse(&self, input: &str) -> FormResult<Vec<RawOcrRecord>>;

    /// Read and parse a file. Parse failures are reported with the file path.
    fn parse_file(&self, path: &Path) -> FormResult<Vec<RawOcrRecord>> {
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!("{}: reading {}", self.name(), path.display());
        self.parse(&contents)
            .map_err(|err| FormError::input_parse_error(self.name(), path, err))
    }
}

/// Picks an adapter from a file extension: `.tsv` for Tesseract, `.json` for records.
///
/// JSON files holding parallel columns must use [`ColumnsJsonAdapter`] explicitly.
pub fn adapter_for_path(path: &Path) -> Option<Box<dyn OcrOutputAdapter>> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("tsv") => Some(Box::new(TesseractTsvAdapter::new())),
        Some("json") => Some(Box::new(RecordsJsonAdapter)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_for_path() {
        assert_eq!(
            adapter_for_path(Path::new("page_0.TSV")).map(|a| a.name().to_string()),
            Some("TesseractTsvAdapter".to_string())
        );
        assert_eq!(
            adapter_for_path(Path::new("page_0.json")).map(|a| a.name().to_string()),
            Some("RecordsJsonAdapter".to_string())
        );
        assert!(adapter_for_path(Path::new("page_0.jpg")).is_none());
    }
}
