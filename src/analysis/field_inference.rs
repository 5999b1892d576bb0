//! Infers blank input fields from horizontal gaps inside each line.
//!
//! For every line the gaps between adjacent tokens, and the gap between the last
//! token and the right margin, are compared against a minimum width proportional to
//! the line height. Qualifying gaps are inset on both sides and capped at a fraction
//! of the page width.

use super::result::{FieldCandidate, LineGroup};
use crate::core::config::LayoutConfig;
use crate::processors::Margins;
use itertools::Itertools;

/// Whether a gap is wide enough to be a field. The comparison is strict.
#[inline]
pub fn gap_qualifies(gap_width: f64, min_field_width: f64) -> bool {
    gap_width > min_field_width
}

/// Per-line limits derived from the line height and page width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLimits {
    pub line_height: i32,
    pub min_field_width: f64,
    pub max_field_width: f64,
}

/// Emits [`FieldCandidate`]s for line groups.
#[derive(Debug, Clone)]
pub struct FieldInference {
    min_field_height_ratio: f64,
    max_field_width_ratio: f64,
    inset: i32,
}

impl FieldInference {
    /// Creates the inference stage from the field ratios and inset of `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            min_field_height_ratio: config.min_field_height_ratio,
            max_field_width_ratio: config.max_field_width_ratio,
            inset: config.field_inset,
        }
    }

    /// Computes the limits for one line.
    pub fn limits(&self, line: &LineGroup, image_width: u32) -> FieldLimits {
        let line_height = line.line_height();
        FieldLimits {
            line_height,
            min_field_width: line_height as f64 * self.min_field_height_ratio,
            max_field_width: image_width as f64 * self.max_field_width_ratio,
        }
    }

    /// Infers fields for every line, flattened in line order then left to right.
    pub fn infer(
        &self,
        lines: &[LineGroup],
        margins: Margins,
        image_width: u32,
    ) -> Vec<FieldCandidate> {
        let fields: Vec<FieldCandidate> = lines
            .iter()
            .flat_map(|line| self.infer_line(line, margins, image_width))
            .collect();
        tracing::debug!("Detected {} input fields", fields.len());
        fields
    }

    /// Infers the fields of a single line from its left-to-right tokens.
    ///
    /// Gap arithmetic is done in `i64`, so extreme token coordinates cannot overflow.
    pub fn infer_line(
        &self,
        line: &LineGroup,
        margins: Margins,
        image_width: u32,
    ) -> Vec<FieldCandidate> {
        let limits = self.limits(line, image_width);
        let right_margin = margins.right as i64;
        let mut fields = Vec::new();

        for (left, right) in line.tokens.iter().tuple_windows() {
            let gap_start = left.bbox.x as i64 + left.bbox.width as i64;
            let gap_width = right.bbox.x as i64 - gap_start;
            if !gap_qualifies(gap_width as f64, limits.min_field_width) {
                continue;
            }
            let width = self.field_width(gap_width, limits);
            // Candidates crossing the right margin are dropped, not clamped.
            if gap_start as f64 + width <= right_margin as f64 {
                fields.extend(self.candidate(line, gap_start, width, limits));
            }
        }

        if let Some(last) = line.tokens.last() {
            let gap_start = last.bbox.x as i64 + last.bbox.width as i64;
            let gap_width = right_margin - gap_start;
            if gap_qualifies(gap_width as f64, limits.min_field_width) {
                let width = self.field_width(gap_width, limits);
                fields.extend(self.candidate(line, gap_start, width, limits));
            }
        }

        fields
    }

    /// Builds the candidate starting `inset` pixels after `gap_start`, or `None` when
    /// that position is not a valid pixel coordinate.
    fn candidate(
        &self,
        line: &LineGroup,
        gap_start: i64,
        width: f64,
        limits: FieldLimits,
    ) -> Option<FieldCandidate> {
        let x = i32::try_from(gap_start + self.inset as i64).ok()?;
        Some(FieldCandidate::new(
            x,
            line.bounding_box.top(),
            width,
            limits.line_height,
        ))
    }

    fn field_width(&self, gap_width: i64, limits: FieldLimits) -> f64 {
        ((gap_width - 2 * self.inset as i64) as f64).min(limits.max_field_width)
    }
}
