//! Input Validation Utilities
//!
//! Precondition checks run before the layout core, so the core itself can stay total.

use crate::core::errors::FormError;

/// Validates that a value is within a specified range (inclusive).
#[inline]
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    param_name: &str,
) -> Result<(), FormError> {
    if value < min || value > max {
        return Err(FormError::InvalidInput {
            message: format!(
                "Parameter '{}' must be in range [{}, {}], got: {}",
                param_name, min, max, value
            ),
        });
    }
    Ok(())
}

/// Validates that a value is positive (> 0).
#[inline]
pub fn validate_positive<T: PartialOrd + std::fmt::Display + Default>(
    value: T,
    param_name: &str,
) -> Result<(), FormError> {
    if value <= T::default() {
        return Err(FormError::InvalidInput {
            message: format!(
                "Parameter '{}' must be positive, got: {}",
                param_name, value
            ),
        });
    }
    Ok(())
}

/// Validates page dimensions before analysis.
///
/// Both dimensions must be positive and fit in the signed pixel space used for
/// token coordinates.
pub fn validate_page_dimensions(width: u32, height: u32) -> Result<(), FormError> {
    validate_positive(width, "image_width")?;
    validate_positive(height, "image_height")?;
    validate_range(width, 1, i32::MAX as u32, "image_width")?;
    validate_range(height, 1, i32::MAX as u32, "image_height")?;
    Ok(())
}

/// Validates that parallel collections have the same length.
#[inline]
pub fn validate_same_length(
    expected: usize,
    actual: usize,
    param_name: &str,
) -> Result<(), FormError> {
    if expected != actual {
        return Err(FormError::invalid_field(
            param_name,
            format!("{} entries", expected),
            format!("{} entries", actual),
        ));
    }
    Ok(())
}
