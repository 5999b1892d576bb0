//! Tunable constants of the token filter, line clusterer and field inference.

use super::errors::{ConfigError, ConfigValidator};
use crate::core::errors::FormResult;
use crate::processors::CoercionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for analyzing one form page.
///
/// Every field has a serde default, so a partial JSON document such as
/// `{"margin_percent": 8}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Percentage of the page width ignored on each side.
    /// Default: 5.0
    #[serde(default = "LayoutConfig::default_margin_percent")]
    pub margin_percent: f64,

    /// Records must have a confidence strictly above this value to be kept.
    /// Default: 30
    #[serde(default = "LayoutConfig::default_min_confidence")]
    pub min_confidence: i32,

    /// A token joins the open line when its top edge is closer than
    /// `height * line_threshold_ratio` to the top edge of the line's first token.
    /// Default: 0.7
    #[serde(default = "LayoutConfig::default_line_threshold_ratio")]
    pub line_threshold_ratio: f64,

    /// Padding in pixels added around each line's bounding box.
    /// Default: 2
    #[serde(default = "LayoutConfig::default_line_padding")]
    pub line_padding: i32,

    /// A gap must be wider than `line_height * min_field_height_ratio` to become a field.
    /// Default: 1.5
    #[serde(default = "LayoutConfig::default_min_field_height_ratio")]
    pub min_field_height_ratio: f64,

    /// Fields never exceed `image_width * max_field_width_ratio`.
    /// Default: 0.4
    #[serde(default = "LayoutConfig::default_max_field_width_ratio")]
    pub max_field_width_ratio: f64,

    /// Horizontal inset applied on both sides of a gap when emitting a field.
    /// Default: 5
    #[serde(default = "LayoutConfig::default_field_inset")]
    pub field_inset: i32,

    /// What to do with a confidence value that cannot be parsed.
    #[serde(default)]
    pub coercion: CoercionPolicy,
}

impl LayoutConfig {
    /// Create a new LayoutConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the margin percentage.
    pub fn with_margin_percent(mut self, margin_percent: f64) -> Self {
        self.margin_percent = margin_percent;
        self
    }

    /// Set the confidence gate.
    pub fn with_min_confidence(mut self, min_confidence: i32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set the line clustering ratio.
    pub fn with_line_threshold_ratio(mut self, ratio: f64) -> Self {
        self.line_threshold_ratio = ratio;
        self
    }

    /// Set the coercion policy for malformed confidence values.
    pub fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    fn default_margin_percent() -> f64 {
        5.0
    }

    fn default_min_confidence() -> i32 {
        30
    }

    fn default_line_threshold_ratio() -> f64 {
        0.7
    }

    fn default_line_padding() -> i32 {
        2
    }

    fn default_min_field_height_ratio() -> f64 {
        1.5
    }

    fn default_max_field_width_ratio() -> f64 {
        0.4
    }

    fn default_field_inset() -> i32 {
        5
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_percent: Self::default_margin_percent(),
            min_confidence: Self::default_min_confidence(),
            line_threshold_ratio: Self::default_line_threshold_ratio(),
            line_padding: Self::default_line_padding(),
            min_field_height_ratio: Self::default_min_field_height_ratio(),
            max_field_width_ratio: Self::default_max_field_width_ratio(),
            field_inset: Self::default_field_inset(),
            coercion: CoercionPolicy::default(),
        }
    }
}

impl ConfigValidator for LayoutConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_ratio("margin_percent", self.margin_percent, 0.0, 50.0)?;
        self.validate_ratio("line_threshold_ratio", self.line_threshold_ratio, 0.0, 10.0)?;
        self.validate_ratio(
            "min_field_height_ratio",
            self.min_field_height_ratio,
            0.0,
            100.0,
        )?;
        self.validate_ratio("max_field_width_ratio", self.max_field_width_ratio, 0.0, 1.0)?;
        if self.line_padding < 0 || self.field_inset < 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "line_padding and field_inset must be non-negative, got {} and {}",
                    self.line_padding, self.field_inset
                ),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.margin_percent, 5.0);
        assert_eq!(config.min_confidence, 30);
        assert_eq!(config.coercion, CoercionPolicy::ZeroOnError);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"margin_percent": 8}"#).unwrap();
        assert_eq!(config.margin_percent, 8.0);
        assert_eq!(config.line_padding, 2);
        assert_eq!(config.field_inset, 5);
    }

    #[test]
    fn test_rejects_out_of_range_margin() {
        let config = LayoutConfig::new().with_margin_percent(60.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "margin_percent",
                ..
            })
        ));

        let config = LayoutConfig::new().with_margin_percent(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"line_threshold_ratio": -1.0}}"#).unwrap();
        assert!(LayoutConfig::from_json_file(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_confidence": 50}}"#).unwrap();
        let config = LayoutConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.min_confidence, 50);
    }
}
