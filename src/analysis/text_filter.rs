//! Optional post-filters over detected line texts.
//!
//! A filter is an explicitly constructed collaborator handed to the analyzer
//! builder. Nothing is filtered unless one is injected. Filters only rewrite the
//! page's `line_texts`; line geometry and field candidates are never touched.

use crate::core::errors::FormResult;
use std::fmt::Debug;

/// Trait for filters that keep only the line texts likely to belong to a form.
///
/// Implementations backed by a remote model own their client and its lifecycle;
/// the analyzer only calls [`TextFilter::filter`].
pub trait TextFilter: Debug + Send + Sync {
    /// Get the filter name for debugging
    fn name(&self) -> &str;

    /// Returns the subset of `lines` to keep, in their original order.
    fn filter(&self, lines: &[String]) -> FormResult<Vec<String>>;
}

/// Filter that keeps every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepAll;

impl TextFilter for KeepAll {
    fn name(&self) -> &str {
        "KeepAll"
    }

    fn filter(&self, lines: &[String]) -> FormResult<Vec<String>> {
        Ok(lines.to_vec())
    }
}

/// Filter that drops lines containing any of the given keywords (case-insensitive),
/// e.g. headings and boilerplate such as "instructions" or "page".
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    fn is_excluded(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.keywords.iter().any(|keyword| line.contains(keyword))
    }
}

impl TextFilter for KeywordFilter {
    fn name(&self) -> &str {
        "KeywordFilter"
    }

    fn filter(&self, lines: &[String]) -> FormResult<Vec<String>> {
        Ok(lines
            .iter()
            .filter(|line| !self.is_excluded(line))
            .cloned()
            .collect())
    }
}
