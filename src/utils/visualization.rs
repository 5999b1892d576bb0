//! Overlay rendering for analyzed pages.
//!
//! Draws the margin guides, the line group boxes and the inferred field boxes on top
//! of the page image so detection results can be checked by eye.

use crate::analysis::PageResult;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Colors and stroke width of an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub margin_color: Rgb<u8>,
    pub line_color: Rgb<u8>,
    pub field_color: Rgb<u8>,
    /// Stroke width of boxes in pixels.
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            margin_color: Rgb([128, 128, 128]),
            line_color: Rgb([0, 255, 0]),
            field_color: Rgb([255, 0, 0]),
            thickness: 2,
        }
    }
}

/// Renders `result` over a copy of `page`.
pub fn render_overlay(page: &RgbImage, result: &PageResult, style: &OverlayStyle) -> RgbImage {
    let mut canvas = page.clone();
    let bottom = canvas.height().saturating_sub(1) as f32;

    for x in [result.margins.left, result.margins.right] {
        let x = x as f32;
        draw_line_segment_mut(&mut canvas, (x, 0.0), (x, bottom), style.margin_color);
    }

    for line in &result.line_groups {
        let bbox = line.bounding_box;
        draw_box(
            &mut canvas,
            bbox.left(),
            bbox.top(),
            bbox.right(),
            bbox.bottom(),
            style.line_color,
            style.thickness,
        );
    }

    for field in &result.fields {
        let right = (field.x as f64 + field.width) as i32;
        draw_box(
            &mut canvas,
            field.x,
            field.y,
            right,
            field.y.saturating_add(field.height),
            style.field_color,
            style.thickness,
        );
    }

    tracing::debug!(
        "Rendered overlay with {} line boxes and {} field boxes",
        result.line_groups.len(),
        result.fields.len()
    );
    canvas
}

/// Draws a hollow box clipped to the canvas; the stroke grows inwards.
fn draw_box(
    canvas: &mut RgbImage,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    color: Rgb<u8>,
    thickness: u32,
) {
    let left = left.max(0) as i64;
    let top = top.max(0) as i64;
    let right = (right as i64).min(canvas.width() as i64);
    let bottom = (bottom as i64).min(canvas.height() as i64);

    for inset in 0..thickness as i64 {
        let width = right - left - 2 * inset;
        let height = bottom - top - 2 * inset;
        // Rect::of_size panics on zero sizes.
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at((left + inset) as i32, (top + inset) as i32)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FieldCandidate, LineGroup};
    use crate::processors::{BoundingBox, Margins};

    fn result() -> PageResult {
        let margins = Margins::from_page_width(200, 5.0);
        let line = LineGroup {
            tokens: Vec::new(),
            bounding_box: BoundingBox::new(10, 8, 150, 24),
            text: "Name John".to_string(),
        };
        PageResult::new(
            vec![line],
            vec![FieldCandidate::new(55, 8, 60.0, 24)],
            200,
            100,
            margins,
        )
    }

    #[test]
    fn test_overlay_draws_lines_and_fields() {
        let page = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        let style = OverlayStyle::default();
        let canvas = render_overlay(&page, &result(), &style);

        assert_eq!(canvas.dimensions(), page.dimensions());
        assert_eq!(*canvas.get_pixel(10, 50), style.margin_color);
        assert_eq!(*canvas.get_pixel(55, 8), style.field_color);
        assert_eq!(*canvas.get_pixel(56, 9), style.field_color);
        assert_eq!(*canvas.get_pixel(30, 8), style.line_color);
        assert_eq!(*canvas.get_pixel(100, 80), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_boxes_at_pixel_space_limits() {
        let mut page_result = result();
        page_result.fields = vec![FieldCandidate::new(i32::MAX - 5, i32::MAX - 5, 60.0, 24)];
        page_result.line_groups[0].bounding_box = BoundingBox::new(i32::MIN, 8, i32::MAX, 24);
        let page = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        let canvas = render_overlay(&page, &page_result, &OverlayStyle::default());
        assert_eq!(canvas.dimensions(), (200, 100));
    }

    #[test]
    fn test_degenerate_boxes_are_skipped() {
        let mut page_result = result();
        page_result.fields = vec![FieldCandidate::new(500, 8, 0.0, 24)];
        let page = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        let canvas = render_overlay(&page, &page_result, &OverlayStyle::default());
        assert_eq!(canvas.dimensions(), (200, 100));
    }
}
