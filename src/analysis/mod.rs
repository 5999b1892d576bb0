//! Form layout analysis.
//!
//! A page flows through three stages:
//! 1. [`TokenFilter`] drops unusable OCR records and sorts the rest into reading order.
//! 2. [`LineClusterer`] groups the tokens into visual lines.
//! 3. [`FieldInference`] turns wide horizontal gaps into blank field candidates.
//!
//! [`FormAnalyzer`] runs the stages for one page and [`DocumentAnalyzer`] for many.

pub mod analyzer;
pub mod document;
pub mod field_inference;
pub mod line_clustering;
pub mod result;
pub mod text_filter;
pub mod token_filter;

pub use analyzer::{FormAnalyzer, FormAnalyzerBuilder, PageInput, analyze_page};
pub use document::{DocumentAnalyzer, DocumentJob};
pub use field_inference::{FieldInference, FieldLimits, gap_qualifies};
pub use line_clustering::LineClusterer;
pub use result::{DocumentMeta, DocumentResult, FieldCandidate, LineGroup, PageResult};
pub use text_filter::{KeepAll, KeywordFilter, TextFilter};
pub use token_filter::{FilterStats, TokenFilter};
