//! Result types for form layout analysis.

use crate::domain::TextToken;
use crate::processors::{BoundingBox, Margins};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens judged to lie on one visual text line.
///
/// Members are sorted left to right. A line group is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGroup {
    /// Member tokens, left to right.
    #[serde(skip)]
    pub tokens: Vec<TextToken>,
    /// Union of member boxes, padded and clamped to the margins and page height.
    pub bounding_box: BoundingBox,
    /// Member texts joined by single spaces.
    pub text: String,
}

impl LineGroup {
    /// Height of the padded bounding box.
    pub fn line_height(&self) -> i32 {
        self.bounding_box.height
    }
}

/// An inferred blank input rectangle.
///
/// `width` is fractional when it was capped by the page-width ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    pub x: i32,
    pub y: i32,
    pub width: f64,
    pub height: i32,
}

impl FieldCandidate {
    pub fn new(x: i32, y: i32, width: f64, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Layout of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Line groups, top to bottom.
    pub line_groups: Vec<LineGroup>,
    /// Line texts, top to bottom. Equal to the line group texts unless a text
    /// filter was applied.
    pub line_texts: Vec<String>,
    /// Field candidates in line order, then left to right.
    pub fields: Vec<FieldCandidate>,
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
    /// Margins used for this page.
    pub margins: Margins,
}

impl PageResult {
    /// Creates a result whose `line_texts` mirror the line groups.
    pub fn new(
        line_groups: Vec<LineGroup>,
        fields: Vec<FieldCandidate>,
        width: u32,
        height: u32,
        margins: Margins,
    ) -> Self {
        let line_texts = line_groups.iter().map(|line| line.text.clone()).collect();
        Self {
            line_groups,
            line_texts,
            fields,
            width,
            height,
            margins,
        }
    }

    /// Returns true if neither lines nor fields were found.
    pub fn is_empty(&self) -> bool {
        self.line_groups.is_empty() && self.fields.is_empty()
    }
}

impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image dimensions: [{}, {}]", self.width, self.height)?;
        writeln!(f, "Margins: [{}, {}]", self.margins.left, self.margins.right)?;
        writeln!(f, "Detected {} line groups", self.line_texts.len())?;
        for (index, text) in self.line_texts.iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, text)?;
        }
        writeln!(f, "Detected {} input fields", self.fields.len())?;
        for field in &self.fields {
            writeln!(
                f,
                "  [{}, {}, {:.1}, {}]",
                field.x, field.y, field.width, field.height
            )?;
        }
        Ok(())
    }
}

/// Document-level geometry summary.
///
/// `width` and `height` are taken from the last page; they are absent for an
/// empty document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub pages: usize,
}

/// Layout of a multi-page document, pages in caller order.
///
/// Serializes as `{"meta": {...}, "texts": [[...]], "fields": [[...]]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub meta: DocumentMeta,
    /// Line texts per page.
    pub texts: Vec<Vec<String>>,
    /// Field candidates per page.
    pub fields: Vec<Vec<FieldCandidate>>,
    /// Full page results.
    #[serde(skip)]
    pub pages: Vec<PageResult>,
}

impl DocumentResult {
    /// Assembles a document from per-page results.
    pub fn from_pages(pages: Vec<PageResult>) -> Self {
        let meta = DocumentMeta {
            width: pages.last().map(|page| page.width),
            height: pages.last().map(|page| page.height),
            pages: pages.len(),
        };
        Self {
            meta,
            texts: pages.iter().map(|page| page.line_texts.clone()).collect(),
            fields: pages.iter().map(|page| page.fields.clone()).collect(),
            pages,
        }
    }

    /// Total number of field candidates across pages.
    pub fn field_count(&self) -> usize {
        self.fields.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(width: u32, texts: &[&str]) -> PageResult {
        let margins = Margins::from_page_width(width, 5.0);
        let lines = texts
            .iter()
            .map(|text| LineGroup {
                tokens: Vec::new(),
                bounding_box: BoundingBox::new(margins.left, 0, 10, 10),
                text: text.to_string(),
            })
            .collect();
        PageResult::new(
            lines,
            vec![FieldCandidate::new(20, 0, 40.0, 10)],
            width,
            100,
            margins,
        )
    }

    #[test]
    fn test_document_meta_uses_last_page() {
        let doc = DocumentResult::from_pages(vec![page(200, &["a"]), page(300, &["b", "c"])]);
        assert_eq!(doc.meta.pages, 2);
        assert_eq!(doc.meta.width, Some(300));
        assert_eq!(doc.texts, vec![vec!["a"], vec!["b", "c"]]);
        assert_eq!(doc.field_count(), 2);
    }

    #[test]
    fn test_empty_document_serializes_page_count_only() {
        let doc = DocumentResult::from_pages(Vec::new());
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"meta":{"pages":0},"texts":[],"fields":[]}"#);
    }

    #[test]
    fn test_page_display_lists_lines() {
        let rendered = page(200, &["Name", "Date"]).to_string();
        assert!(rendered.contains("Detected 2 line groups"));
        assert!(rendered.contains("  2. Date"));
        assert!(rendered.contains("[20, 0, 40.0, 10]"));
    }
}
