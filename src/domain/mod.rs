//! Domain types: raw OCR records, filtered tokens, and readers for OCR output formats.

pub mod adapters;
pub mod token;

pub use adapters::{
    ColumnsJsonAdapter, OcrColumns, OcrOutputAdapter, RecordsJsonAdapter, TesseractTsvAdapter,
    adapter_for_path,
};
pub use token::{RawOcrRecord, TextToken};
