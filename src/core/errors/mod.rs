//! Error handling for the form layout pipeline.

mod types;

pub use types::{FormError, NumericParseError, ProcessingStage};

/// Crate-wide result type.
pub type FormResult<T> = Result<T, FormError>;
