//! Groups sorted tokens into visual text lines.
//!
//! A single pass over the `(y, x)`-sorted tokens keeps one line open. A token joins it
//! when its top edge is within `height * ratio` of the top edge of the line's first
//! token, where `height` is also the first token's height. Any other token closes the
//! line and opens a new one, so the threshold follows each line's leading token
//! rather than a page-wide average. Headings and small labels on the same page then
//! cluster with their own scale.

use super::result::LineGroup;
use crate::core::config::LayoutConfig;
use crate::domain::TextToken;
use crate::processors::{BoundingBox, Margins};

/// Clusters tokens into [`LineGroup`]s.
#[derive(Debug, Clone)]
pub struct LineClusterer {
    threshold_ratio: f64,
    padding: i32,
}

/// State of the line currently being collected.
struct OpenLine {
    tokens: Vec<TextToken>,
    anchor_y: i32,
    threshold: f64,
}

impl OpenLine {
    fn start(token: TextToken, ratio: f64) -> Self {
        Self {
            anchor_y: token.bbox.y,
            threshold: token.bbox.height as f64 * ratio,
            tokens: vec![token],
        }
    }

    fn accepts(&self, token: &TextToken) -> bool {
        ((token.bbox.y as i64 - self.anchor_y as i64).abs() as f64) < self.threshold
    }
}

impl LineClusterer {
    /// Creates a clusterer from the line threshold ratio and padding of `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            threshold_ratio: config.line_threshold_ratio,
            padding: config.line_padding,
        }
    }

    /// Partitions tokens, which must already be sorted by `(y, x)`, into lines.
    ///
    /// Every returned line is non-empty, its members are contiguous in the input
    /// order, and they are re-sorted left to right.
    pub fn cluster(&self, tokens: Vec<TextToken>) -> Vec<Vec<TextToken>> {
        let mut tokens = tokens.into_iter();
        let Some(first) = tokens.next() else {
            return Vec::new();
        };

        let mut lines: Vec<OpenLine> = Vec::new();
        let mut open = OpenLine::start(first, self.threshold_ratio);

        for token in tokens {
            if open.accepts(&token) {
                open.tokens.push(token);
            } else {
                lines.push(std::mem::replace(
                    &mut open,
                    OpenLine::start(token, self.threshold_ratio),
                ));
            }
        }
        lines.push(open);

        lines
            .into_iter()
            .map(|line| {
                let mut members = line.tokens;
                members.sort_by_key(|token| token.bbox.x);
                members
            })
            .collect()
    }

    /// Clusters tokens and builds the padded, clamped line groups.
    pub fn build_groups(
        &self,
        tokens: Vec<TextToken>,
        margins: Margins,
        image_height: u32,
    ) -> Vec<LineGroup> {
        let image_height = i32::try_from(image_height).unwrap_or(i32::MAX);
        let groups: Vec<LineGroup> = self
            .cluster(tokens)
            .into_iter()
            .filter_map(|members| self.build_group(members, margins, image_height))
            .collect();
        tracing::debug!("Detected {} line groups", groups.len());
        groups
    }

    fn build_group(
        &self,
        members: Vec<TextToken>,
        margins: Margins,
        image_height: i32,
    ) -> Option<LineGroup> {
        let bounding_box = BoundingBox::padded_union(
            members.iter().map(|token| &token.bbox),
            self.padding,
            margins,
            image_height,
        )?;
        let text = members
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(LineGroup {
            tokens: members,
            bounding_box,
            text,
        })
    }
}
