//! Geometric primitives for form layout analysis.
//!
//! All coordinates are integer pixels in image space with the origin at the top-left
//! corner. Boxes are axis-aligned; rotated or skewed pages are not supported.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl BoundingBox {
    /// Creates a new bounding box from its top-left corner and size.
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a bounding box from its four edges.
    ///
    /// # Arguments
    ///
    /// * `left` - The x-coordinate of the left edge.
    /// * `top` - The y-coordinate of the top edge.
    /// * `right` - The x-coordinate of the right edge.
    /// * `bottom` - The y-coordinate of the bottom edge.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::from_wide_edges(left as i64, top as i64, right as i64, bottom as i64)
    }

    /// Builds a box from 64-bit edges, saturating every value into `i32`.
    fn from_wide_edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: saturate(left),
            y: saturate(top),
            width: saturate(right - left),
            height: saturate(bottom - top),
        }
    }

    /// Left edge (`x`).
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (`x + width`), saturated.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Top edge (`y`).
    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (`y + height`), saturated.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Edges as `(left, top, right, bottom)` without overflow.
    #[inline]
    fn wide_edges(&self) -> (i64, i64, i64, i64) {
        let (x, y) = (self.x as i64, self.y as i64);
        (x, y, x + self.width as i64, y + self.height as i64)
    }

    /// Returns the union of all boxes grown by `padding` pixels on every side, clamped
    /// horizontally to the page margins and vertically to `[0, image_height]`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn padded_union<'a>(
        boxes: impl IntoIterator<Item = &'a BoundingBox>,
        padding: i32,
        margins: Margins,
        image_height: i32,
    ) -> Option<Self> {
        let (left, top, right, bottom) = boxes
            .into_iter()
            .map(BoundingBox::wide_edges)
            .reduce(|(l1, t1, r1, b1), (l2, t2, r2, b2)| {
                (l1.min(l2), t1.min(t2), r1.max(r2), b1.max(b2))
            })?;

        let padding = padding as i64;
        Some(Self::from_wide_edges(
            (left - padding).max(margins.left as i64),
            (top - padding).max(0),
            (right + padding).min(margins.right as i64),
            (bottom + padding).min(image_height as i64),
        ))
    }
}

#[inline]
fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// The horizontal band of a page in which text is considered.
///
/// `left + right` always equals the page width: the left margin is the truncated
/// percentage of the width and the right margin mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    /// x-coordinate of the left margin.
    pub left: i32,
    /// x-coordinate of the right margin.
    pub right: i32,
}

impl Margins {
    /// Computes the margins for a page of the given width.
    ///
    /// Widths beyond `i32::MAX` are treated as `i32::MAX`.
    pub fn from_page_width(width: u32, margin_percent: f64) -> Self {
        let width = width.min(i32::MAX as u32) as i64;
        let left = (width as f64 * (margin_percent / 100.0)) as i64;
        Self {
            left: saturate(left),
            right: saturate(width - left),
        }
    }

    /// Whether `x` lies within `[left, right]`.
    #[inline]
    pub fn contains_x(&self, x: i32) -> bool {
        self.left <= x && x <= self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges() {
        let bbox = BoundingBox::new(10, 20, 90, 60);
        assert_eq!(bbox.left(), 10);
        assert_eq!(bbox.top(), 20);
        assert_eq!(bbox.right(), 100);
        assert_eq!(bbox.bottom(), 80);
        assert_eq!(BoundingBox::from_edges(10, 20, 100, 80), bbox);
    }

    #[test]
    fn test_padded_union() {
        let margins = Margins { left: 0, right: 1000 };
        let boxes = [
            BoundingBox::new(50, 12, 30, 20),
            BoundingBox::new(10, 10, 20, 18),
            BoundingBox::new(100, 14, 10, 25),
        ];
        let merged = BoundingBox::padded_union(&boxes, 0, margins, 1000).unwrap();
        assert_eq!(merged, BoundingBox::from_edges(10, 10, 110, 39));
        assert_eq!(BoundingBox::padded_union(&[], 2, margins, 1000), None);
    }

    #[test]
    fn test_padded_union_clamps() {
        let margins = Margins { left: 10, right: 190 };
        let boxes = [BoundingBox::from_edges(11, 1, 150, 97)];
        let padded = BoundingBox::padded_union(&boxes, 2, margins, 98).unwrap();
        assert_eq!(padded, BoundingBox::from_edges(10, 0, 152, 98));
    }

    #[test]
    fn test_extreme_edges_do_not_overflow() {
        let bbox = BoundingBox::new(100, 100, i32::MAX, i32::MAX);
        assert_eq!(bbox.right(), i32::MAX);
        assert_eq!(bbox.bottom(), i32::MAX);

        // Vertical span wider than i32: top near i32::MIN, bottom positive.
        let margins = Margins { left: 0, right: 1000 };
        let boxes = [
            BoundingBox::new(100, i32::MIN + 10, 40, 20),
            BoundingBox::new(150, i32::MIN + 20, 40, i32::MAX),
        ];
        let merged = BoundingBox::padded_union(&boxes, 2, margins, 1650).unwrap();
        assert_eq!(merged, BoundingBox::from_edges(98, 0, 192, 21));
    }

    #[test]
    fn test_margins_for_oversized_width() {
        let margins = Margins::from_page_width(u32::MAX, 5.0);
        assert!(margins.left > 0);
        assert!(margins.right > margins.left);
        assert_eq!(margins.left as i64 + margins.right as i64, i32::MAX as i64);
    }

    #[test]
    fn test_margins_sum_to_width() {
        for (width, percent) in [(1275, 5.0), (200, 5.0), (1001, 7.5), (333, 0.0)] {
            let margins = Margins::from_page_width(width, percent);
            assert_eq!(margins.left + margins.right, width as i32);
        }
        let margins = Margins::from_page_width(1275, 5.0);
        assert_eq!(margins, Margins { left: 63, right: 1212 });
        assert!(margins.contains_x(63));
        assert!(margins.contains_x(1212));
        assert!(!margins.contains_x(62));
        assert!(!margins.contains_x(1213));
    }
}
