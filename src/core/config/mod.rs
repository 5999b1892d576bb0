//! Configuration management for the form layout pipeline.
//!
//! This module provides configuration types, validation traits, and utilities
//! for managing pipeline configurations.

pub mod errors;
pub mod layout;
pub mod parallel;

// Re-export commonly used types
pub use errors::{ConfigError, ConfigValidator};
pub use layout::LayoutConfig;
pub use parallel::ParallelPolicy;
