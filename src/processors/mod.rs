//! Geometry and numeric processing helpers shared by the layout stages.

pub mod geometry;
pub mod types;

pub use geometry::{BoundingBox, Margins};
pub use types::{CoercionPolicy, RawNumber, parse_ocr_int, parse_optional_ocr_int};
