//! The core module of the form layout pipeline.
//!
//! This module contains the fundamental components shared by every stage:
//! - Configuration management
//! - Error handling
//! - Input validation
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod validation;

pub use config::{ConfigError, ConfigValidator, LayoutConfig, ParallelPolicy};
pub use errors::{FormError, FormResult, NumericParseError, ProcessingStage};
pub use validation::{
    validate_page_dimensions, validate_positive, validate_range, validate_same_length,
};
