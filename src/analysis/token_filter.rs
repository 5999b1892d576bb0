//! Token filtering and reading-order sort.
//!
//! Raw OCR records pass four gates in order: confidence, empty text, box parsing and
//! left margin. Survivors are stable-sorted by `(y, x)`, which is the only ordering
//! the later stages rely on.

use crate::core::config::LayoutConfig;
use crate::domain::{RawOcrRecord, TextToken};
use crate::processors::{CoercionPolicy, Margins, parse_optional_ocr_int};

/// Counts of records removed by each gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub total: usize,
    pub low_confidence: usize,
    pub empty_text: usize,
    pub malformed_box: usize,
    pub outside_margins: usize,
    pub kept: usize,
}

/// Normalizes raw OCR output into sorted [`TextToken`]s for one page.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    margins: Margins,
    min_confidence: i32,
    coercion: CoercionPolicy,
}

impl TokenFilter {
    /// Creates a filter for a page of the given width.
    pub fn new(config: &LayoutConfig, image_width: u32) -> Self {
        Self {
            margins: Margins::from_page_width(image_width, config.margin_percent),
            min_confidence: config.min_confidence,
            coercion: config.coercion,
        }
    }

    /// The margins derived from the page width.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Filters and sorts the records. Returns an empty vector when nothing survives.
    pub fn filter(&self, records: &[RawOcrRecord]) -> Vec<TextToken> {
        self.filter_with_stats(records).0
    }

    /// Like [`TokenFilter::filter`], also reporting how many records each gate removed.
    pub fn filter_with_stats(&self, records: &[RawOcrRecord]) -> (Vec<TextToken>, FilterStats) {
        let mut stats = FilterStats {
            total: records.len(),
            ..FilterStats::default()
        };
        let mut tokens = Vec::with_capacity(records.len());

        for record in records {
            let confidence = self
                .coercion
                .resolve(parse_optional_ocr_int(record.confidence.as_ref()));
            let confidence = match confidence {
                Some(value) if value > self.min_confidence => value,
                _ => {
                    stats.low_confidence += 1;
                    continue;
                }
            };

            let text = record.text.trim();
            if text.is_empty() {
                stats.empty_text += 1;
                continue;
            }

            let bbox = match record.parse_box() {
                Ok(bbox) => bbox,
                Err(err) => {
                    tracing::debug!("Dropping token {:?} with malformed box: {}", text, err);
                    stats.malformed_box += 1;
                    continue;
                }
            };

            if !self.margins.contains_x(bbox.x) {
                stats.outside_margins += 1;
                continue;
            }

            tokens.push(TextToken::new(text, bbox, confidence));
        }

        tokens.sort_by_key(|token| (token.bbox.y, token.bbox.x));
        stats.kept = tokens.len();

        tracing::debug!(
            "Token filter kept {}/{} records (low confidence: {}, empty: {}, malformed box: {}, outside margins: {})",
            stats.kept,
            stats.total,
            stats.low_confidence,
            stats.empty_text,
            stats.malformed_box,
            stats.outside_margins
        );

        (tokens, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::{BoundingBox, RawNumber};

    fn filter(width: u32) -> TokenFilter {
        TokenFilter::new(&LayoutConfig::default(), width)
    }

    #[test]
    fn test_confidence_gate_is_strict() {
        let records = vec![
            RawOcrRecord::new("low", (20, 10, 30, 20), 30),
            RawOcrRecord::new("high", (60, 10, 30, 20), 31),
        ];
        let (tokens, stats) = filter(200).filter_with_stats(&records);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "high");
        assert_eq!(stats.low_confidence, 1);
    }

    #[test]
    fn test_malformed_confidence_is_coerced_to_zero() {
        let records = vec![
            RawOcrRecord::from_raw(
                "bad",
                [20.into(), 10.into(), 30.into(), 20.into()],
                Some("n/a".into()),
            ),
            RawOcrRecord::from_raw("none", [20.into(), 40.into(), 30.into(), 20.into()], None),
            RawOcrRecord::from_raw(
                "text",
                [20.into(), 70.into(), 30.into(), 20.into()],
                Some(RawNumber::Text("88.9".to_string())),
            ),
        ];
        let tokens = filter(200).filter(&records);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "text");
        assert_eq!(tokens[0].confidence, 88);
    }

    #[test]
    fn test_zero_policy_admits_malformed_confidence_below_negative_gate() {
        let config = LayoutConfig::default().with_min_confidence(-1);
        let records = vec![RawOcrRecord::from_raw(
            "kept",
            [20.into(), 10.into(), 30.into(), 20.into()],
            Some("n/a".into()),
        )];
        assert_eq!(TokenFilter::new(&config, 200).filter(&records).len(), 1);

        let config = config.with_coercion(CoercionPolicy::DropRecord);
        assert!(TokenFilter::new(&config, 200).filter(&records).is_empty());
    }

    #[test]
    fn test_text_is_trimmed_and_blank_dropped() {
        let records = vec![
            RawOcrRecord::new("   ", (20, 10, 30, 20), 95),
            RawOcrRecord::new("  Name: ", (20, 40, 30, 20), 95),
        ];
        let (tokens, stats) = filter(200).filter_with_stats(&records);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Name:");
        assert_eq!(stats.empty_text, 1);
    }

    #[test]
    fn test_malformed_box_drops_token() {
        let records = vec![RawOcrRecord::from_raw(
            "Name",
            ["x".into(), 10.into(), 30.into(), 20.into()],
            Some(90.into()),
        )];
        let (tokens, stats) = filter(200).filter_with_stats(&records);
        assert!(tokens.is_empty());
        assert_eq!(stats.malformed_box, 1);
    }

    #[test]
    fn test_box_edge_past_pixel_space_drops_token() {
        let records = vec![
            RawOcrRecord::new("Name", (100, 100, i32::MAX, 20), 90),
            RawOcrRecord::new("John", (300, 100, 40, 20), 90),
        ];
        let (tokens, stats) = filter(1275).filter_with_stats(&records);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "John");
        assert_eq!(stats.malformed_box, 1);
    }

    #[test]
    fn test_margin_gate_checks_left_edge_only() {
        // width 200 -> margins [10, 190]
        let records = vec![
            RawOcrRecord::new("outside-left", (9, 10, 30, 20), 90),
            RawOcrRecord::new("on-left", (10, 40, 30, 20), 90),
            RawOcrRecord::new("overhang", (180, 70, 60, 20), 90),
            RawOcrRecord::new("on-right", (190, 100, 5, 20), 90),
            RawOcrRecord::new("outside-right", (191, 130, 5, 20), 90),
        ];
        let texts: Vec<String> = filter(200)
            .filter(&records)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["on-left", "overhang", "on-right"]);
    }

    #[test]
    fn test_sorted_by_y_then_x_stably() {
        let records = vec![
            RawOcrRecord::new("c", (100, 50, 10, 20), 90),
            RawOcrRecord::new("b", (60, 10, 10, 20), 90),
            RawOcrRecord::new("a", (20, 10, 10, 20), 90),
            RawOcrRecord::new("a2", (20, 10, 10, 22), 90),
        ];
        let tokens = filter(200).filter(&records);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "a2", "b", "c"]);
        assert_eq!(tokens[0].bbox, BoundingBox::new(20, 10, 10, 20));
    }

    #[test]
    fn test_empty_input() {
        assert!(filter(200).filter(&[]).is_empty());
    }
}
