//! Core error types for the form layout pipeline.
//!
//! This module defines the error types used throughout the crate, including the main
//! `FormError` enum, the `ProcessingStage` enum and the error returned by the numeric
//! parser used for OCR fields.

use thiserror::Error;

/// Errors produced when an OCR numeric field cannot be read as an integer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericParseError {
    /// The field was absent (`null` or missing column).
    #[error("value is missing")]
    Missing,
    /// The field was present but blank after trimming.
    #[error("value is empty")]
    Empty,
    /// The field is not a number.
    #[error("'{value}' is not a number")]
    NotANumber {
        /// The raw text that failed to parse.
        value: String,
    },
    /// The field is NaN or infinite.
    #[error("value {value} is not finite")]
    NonFinite {
        /// The offending value.
        value: f64,
    },
    /// The field does not fit in a 32-bit pixel coordinate.
    #[error("value {value} is out of range")]
    OutOfRange {
        /// The offending value.
        value: f64,
    },
}

/// Enum representing different stages of the form layout pipeline.
///
/// This enum is used to identify which stage an error occurred in,
/// providing context for debugging and error handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while parsing OCR engine output.
    InputParsing,
    /// Error occurred inside an injected text filter.
    TextFiltering,
    /// Error occurred while analyzing a multi-page document.
    DocumentAnalysis,
    /// Error occurred while rendering an overlay image.
    Rendering,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::InputParsing => write!(f, "input parsing"),
            ProcessingStage::TextFiltering => write!(f, "text filtering"),
            ProcessingStage::DocumentAnalysis => write!(f, "document analysis"),
            ProcessingStage::Rendering => write!(f, "rendering"),
        }
    }
}

/// Enum representing the errors that can occur in the form layout pipeline.
///
/// "Zero fields detected" is never an error: an empty page yields an `Ok` result with
/// empty vectors, while every variant here means processing did not complete.
#[derive(Error, Debug)]
pub enum FormError {
    /// Error occurred while loading or decoding a page image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Malformed OCR engine output that cannot be recovered locally.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the source document.
        line: usize,
        /// A message describing the problem.
        message: String,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for FormError {
    /// Converts an image::ImageError to FormError::ImageLoad.
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for FormError {
    /// Converts a ConfigError to FormError::ConfigError.
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}

impl FormError {
    /// Creates a configuration error with context and details.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use form_layout::core::errors::FormError;
    /// let err = FormError::config_error_detailed(
    ///     "layout config",
    ///     "margin_percent must be below 50",
    /// );
    /// assert!(matches!(err, FormError::ConfigError { .. }));
    /// ```
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates an input error for a field holding an unexpected value.
    ///
    /// # Arguments
    ///
    /// * `field` - The name of the field with an invalid value
    /// * `expected` - Description of what was expected
    /// * `actual` - Description of what was actually provided
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }

    /// Wraps an error raised while parsing the OCR output read from `path`.
    pub fn input_parse_error(adapter: &str, path: &std::path::Path, source: FormError) -> Self {
        Self::Processing {
            kind: ProcessingStage::InputParsing,
            context: format!("{} '{}'", adapter, path.display()),
            source: Box::new(source),
        }
    }

    /// Wraps an error raised by an injected text filter.
    pub fn text_filter_error(
        filter: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::TextFiltering,
            context: format!("filter '{}'", filter.into()),
            source: Box::new(source),
        }
    }

    /// Wraps an error raised while analyzing one page of a document.
    pub fn page_error(page_index: usize, source: FormError) -> Self {
        Self::Processing {
            kind: ProcessingStage::DocumentAnalysis,
            context: format!("page {}", page_index),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_display_names_stage() {
        let err = FormError::page_error(
            3,
            FormError::InvalidInput {
                message: "image width must be positive".to_string(),
            },
        );
        assert_eq!(err.to_string(), "document analysis failed: page 3");
    }

    #[test]
    fn test_config_error_converts() {
        let err: FormError = crate::core::config::ConfigError::InvalidConfig {
            message: "bad ratio".to_string(),
        }
        .into();
        assert!(matches!(err, FormError::ConfigError { .. }));
        assert!(err.to_string().contains("bad ratio"));
    }

    #[test]
    fn test_numeric_parse_error_messages() {
        let err = NumericParseError::NotANumber {
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "'abc' is not a number");
    }
}
