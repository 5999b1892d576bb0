//! High-level page analyzer API.
//!
//! This module provides `FormAnalyzerBuilder` for constructing a [`FormAnalyzer`]
//! with a fluent API, and [`analyze_page`] for one-off calls with default settings.

use super::field_inference::FieldInference;
use super::line_clustering::LineClusterer;
use super::result::PageResult;
use super::text_filter::TextFilter;
use super::token_filter::TokenFilter;
use crate::core::config::{ConfigValidator, LayoutConfig};
use crate::core::errors::{FormError, FormResult, ProcessingStage};
use crate::core::validation::validate_page_dimensions;
use crate::domain::RawOcrRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// OCR output of one page together with the page raster dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub records: Vec<RawOcrRecord>,
    pub width: u32,
    pub height: u32,
}

impl PageInput {
    pub fn new(records: Vec<RawOcrRecord>, width: u32, height: u32) -> Self {
        Self {
            records,
            width,
            height,
        }
    }
}

/// Analyzes single pages: token filtering, line clustering and field inference.
///
/// The analyzer holds configuration only; each call is independent, so one instance
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct FormAnalyzer {
    config: LayoutConfig,
    text_filter: Option<Arc<dyn TextFilter>>,
}

impl FormAnalyzer {
    /// Creates an analyzer with the default configuration and no text filter.
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
            text_filter: None,
        }
    }

    /// Returns a builder.
    pub fn builder() -> FormAnalyzerBuilder {
        FormAnalyzerBuilder::new()
    }

    /// The configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Analyzes one page.
    pub fn analyze_page(&self, page: &PageInput) -> FormResult<PageResult> {
        self.analyze(&page.records, page.width, page.height)
    }

    /// Analyzes OCR records of a page with the given raster dimensions.
    ///
    /// Fails only on invalid dimensions or a failing text filter; a page without
    /// usable tokens yields an empty result.
    pub fn analyze(
        &self,
        records: &[RawOcrRecord],
        width: u32,
        height: u32,
    ) -> FormResult<PageResult> {
        validate_page_dimensions(width, height)?;
        let start = Instant::now();

        let token_filter = TokenFilter::new(&self.config, width);
        let margins = token_filter.margins();
        let tokens = token_filter.filter(records);

        let lines = LineClusterer::new(&self.config).build_groups(tokens, margins, height);
        let fields = FieldInference::new(&self.config).infer(&lines, margins, width);

        let mut result = PageResult::new(lines, fields, width, height, margins);
        if let Some(filter) = &self.text_filter {
            let before = result.line_texts.len();
            result.line_texts = filter.filter(&result.line_texts).map_err(|err| match err {
                FormError::Processing {
                    kind: ProcessingStage::TextFiltering,
                    ..
                } => err,
                other => FormError::text_filter_error(filter.name(), other),
            })?;
            tracing::debug!(
                "Text filter '{}' kept {}/{} lines",
                filter.name(),
                result.line_texts.len(),
                before
            );
        }

        tracing::debug!(
            "Analyzed {}x{} page in {:.2}ms: {} lines, {} fields",
            width,
            height,
            start.elapsed().as_secs_f64() * 1000.0,
            result.line_groups.len(),
            result.fields.len()
        );
        Ok(result)
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`FormAnalyzer`].
///
/// # Example
///
/// ```rust
/// use form_layout::analysis::{FormAnalyzerBuilder, KeywordFilter};
/// use std::sync::Arc;
///
/// let analyzer = FormAnalyzerBuilder::new()
///     .margin_percent(4.0)
///     .text_filter(Arc::new(KeywordFilter::new(["instructions"])))
///     .build()
///     .expect("valid configuration");
/// assert_eq!(analyzer.config().margin_percent, 4.0);
/// ```
#[derive(Debug, Default)]
pub struct FormAnalyzerBuilder {
    config: Option<LayoutConfig>,
    margin_percent: Option<f64>,
    text_filter: Option<Arc<dyn TextFilter>>,
}

impl FormAnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full layout configuration.
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the margin percentage of the configuration.
    pub fn margin_percent(mut self, margin_percent: f64) -> Self {
        self.margin_percent = Some(margin_percent);
        self
    }

    /// Injects a post-filter for line texts.
    pub fn text_filter(mut self, filter: Arc<dyn TextFilter>) -> Self {
        self.text_filter = Some(filter);
        self
    }

    /// Validates the configuration and builds the analyzer.
    pub fn build(self) -> FormResult<FormAnalyzer> {
        let mut config = self.config.unwrap_or_default();
        if let Some(margin_percent) = self.margin_percent {
            config.margin_percent = margin_percent;
        }
        config.validate().map_err(|err| {
            FormError::config_error_detailed("form analyzer", err.to_string())
        })?;

        Ok(FormAnalyzer {
            config,
            text_filter: self.text_filter,
        })
    }
}

/// Analyzes one page with the default configuration and the given margin percentage.
pub fn analyze_page(
    records: &[RawOcrRecord],
    width: u32,
    height: u32,
    margin_percent: f64,
) -> FormResult<PageResult> {
    FormAnalyzerBuilder::new()
        .margin_percent(margin_percent)
        .build()?
        .analyze(records, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::FieldCandidate;
    use crate::analysis::text_filter::KeywordFilter;

    #[derive(Debug)]
    struct FailingFilter;

    impl TextFilter for FailingFilter {
        fn name(&self) -> &str {
            "FailingFilter"
        }

        fn filter(&self, _lines: &[String]) -> FormResult<Vec<String>> {
            Err(FormError::Io(std::io::Error::other("model unavailable")))
        }
    }

    fn name_john() -> Vec<RawOcrRecord> {
        vec![
            RawOcrRecord::new("Name", (10, 10, 40, 20), 90),
            RawOcrRecord::new("John", (120, 10, 40, 20), 90),
        ]
    }

    #[test]
    fn test_name_john_scenario() {
        let result = analyze_page(&name_john(), 200, 100, 5.0).unwrap();
        assert_eq!(result.line_texts, vec!["Name John"]);
        assert_eq!(result.fields, vec![FieldCandidate::new(55, 8, 60.0, 24)]);
        assert_eq!((result.width, result.height), (200, 100));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let result = FormAnalyzer::new().analyze(&[], 1275, 1650).unwrap();
        assert!(result.is_empty());
        assert!(result.line_texts.is_empty());
        assert_eq!((result.width, result.height), (1275, 1650));
    }

    #[test]
    fn test_invalid_dimensions_fail_before_core() {
        let err = FormAnalyzer::new().analyze(&name_john(), 0, 100).unwrap_err();
        assert!(matches!(err, FormError::InvalidInput { .. }));
    }

    #[test]
    fn test_builder_rejects_invalid_margin() {
        let err = FormAnalyzerBuilder::new().margin_percent(75.0).build().unwrap_err();
        assert!(matches!(err, FormError::ConfigError { .. }));
    }

    #[test]
    fn test_text_filter_only_rewrites_line_texts() {
        let analyzer = FormAnalyzerBuilder::new()
            .text_filter(Arc::new(KeywordFilter::new(["john"])))
            .build()
            .unwrap();
        let result = analyzer.analyze(&name_john(), 200, 100).unwrap();
        assert!(result.line_texts.is_empty());
        assert_eq!(result.line_groups.len(), 1);
        assert_eq!(result.fields.len(), 1);
    }

    #[test]
    fn test_failing_text_filter_propagates() {
        let analyzer = FormAnalyzerBuilder::new()
            .text_filter(Arc::new(FailingFilter))
            .build()
            .unwrap();
        let err = analyzer.analyze(&name_john(), 200, 100).unwrap_err();
        assert_eq!(err.to_string(), "text filtering failed: filter 'FailingFilter'");
    }
}
