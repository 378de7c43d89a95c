//! Error types for core raster operations.
//!
//! The source runtime this crate reimplements had no error channel at all:
//! non-positive dimensions and wrongly-sized buffers were simply undefined
//! behavior. Every such case is an explicit error here. Out-of-range *reads*
//! are not errors - they are zero-padded by design (see
//! [`crate::raster::zero_padded_read`]).
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing raster views.
#[derive(Debug, Error)]
pub enum Error {
    /// A raster was declared with a non-positive width or height.
    ///
    /// Every raster participating in an evaluation must have `width > 0`
    /// and `height > 0`.
    #[error("invalid raster dimensions {width}x{height}: both must be positive")]
    InvalidDimension {
        /// Declared width
        width: i64,
        /// Declared height
        height: i64,
    },

    /// A buffer's length does not match its declared dimensions.
    ///
    /// A `width x height` raster needs exactly `width * height` samples.
    #[error("buffer holds {actual} samples but {expected} are required")]
    BufferSizeMismatch {
        /// Samples required by the declared dimensions
        expected: usize,
        /// Samples actually supplied
        actual: usize,
    },
}
