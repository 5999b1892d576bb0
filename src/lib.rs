//! # Form Layout
//!
//! A library that reconstructs the layout of scanned paper forms from OCR output.
//!
//! Given the words an OCR engine found on a page, the crate:
//! - filters out low-confidence, empty and margin tokens and sorts the rest into
//!   reading order,
//! - clusters the tokens into visual text lines,
//! - infers blank input fields from wide horizontal gaps between and after words.
//!
//! ## Modules
//!
//! * [`core`] - Configuration, errors and input validation
//! * [`domain`] - OCR records, tokens and readers for OCR output formats
//! * [`processors`] - Geometry and numeric coercion helpers
//! * [`analysis`] - The filtering, clustering and inference stages and their drivers
//! * [`utils`] - Logging setup and overlay rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use form_layout::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = vec![
//!     RawOcrRecord::new("Name", (10, 10, 40, 20), 90),
//!     RawOcrRecord::new("John", (120, 10, 40, 20), 90),
//! ];
//!
//! let analyzer = FormAnalyzerBuilder::new().margin_percent(5.0).build()?;
//! let page = analyzer.analyze(&records, 200, 100)?;
//!
//! assert_eq!(page.line_texts, vec!["Name John"]);
//! for field in &page.fields {
//!     println!("field at ({}, {}) {}x{}", field.x, field.y, field.width, field.height);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod core;
pub mod domain;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use form_layout::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::{
        DocumentAnalyzer, DocumentResult, FieldCandidate, FormAnalyzer, FormAnalyzerBuilder,
        KeywordFilter, LineGroup, PageInput, PageResult, TextFilter, analyze_page,
    };
    pub use crate::core::{FormError, FormResult, LayoutConfig, ParallelPolicy};
    pub use crate::domain::{OcrOutputAdapter, RawOcrRecord, TesseractTsvAdapter, TextToken};
    pub use crate::utils::init_tracing;
}
