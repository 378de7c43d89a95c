//! Raster views and the zero-padded accessor.
//!
//! This module provides the three raster types of the runtime:
//!
//! - [`Image`] - Immutable borrowed view over a caller-owned `u8` buffer
//! - [`ImageMut`] - Mutable borrowed view, used for the output raster
//! - [`Plane`] - Owned `i64` raster for materialized intermediate values
//!
//! # Boundary Policy
//!
//! All neighbor and edge access routes through [`zero_padded_read`]: any
//! coordinate outside `[0, width) x [0, height)` reads as 0. This is the sole
//! mechanism by which convolution taps near raster edges are defined, and it
//! applies identically to input images and materialized planes so that both
//! evaluation strategies observe the same values everywhere.
//!
//! # Memory Layout
//!
//! Row-major, single channel: `index = y * width + x`. Coordinates are `i64`
//! because convolution taps legitimately go negative.
//!
//! # Usage
//!
//! ```rust
//! use pixelgraph_core::Image;
//!
//! let data = vec![7u8; 4 * 3];
//! let img = Image::new(&data, 4, 3).unwrap();
//!
//! assert_eq!(img.sample(0, 0), 7);
//! assert_eq!(img.sample(-1, 0), 0); // zero-padded
//! assert_eq!(img.sample(0, 3), 0);  // zero-padded
//! ```

use crate::error::{Error, Result};

/// Returns `true` if `(x, y)` lies inside `[0, width) x [0, height)`.
///
/// This is the one range predicate of the runtime; both the padded accessor
/// below and the functional evaluator's node-boundary padding use it.
#[inline]
pub fn in_bounds(width: i64, height: i64, x: i64, y: i64) -> bool {
    x >= 0 && x < width && y >= 0 && y < height
}

/// Zero-padded, widening read from a row-major raster.
///
/// Returns 0 for any coordinate outside `[0, width) x [0, height)`, otherwise
/// the sample at `y * width + x` widened to `i64`. `u8` samples are
/// zero-extended.
///
/// # Example
///
/// ```rust
/// use pixelgraph_core::zero_padded_read;
///
/// let data = [10u8, 20, 30, 40];
/// assert_eq!(zero_padded_read(&data, 2, 2, 1, 1), 40);
/// assert_eq!(zero_padded_read(&data, 2, 2, 2, 0), 0);
/// assert_eq!(zero_padded_read(&data, 2, 2, 0, -1), 0);
/// ```
#[inline]
pub fn zero_padded_read<T>(data: &[T], width: i64, height: i64, x: i64, y: i64) -> i64
where
    T: Copy + Into<i64>,
{
    if !in_bounds(width, height, x, y) {
        return 0;
    }
    data[(y * width + x) as usize].into()
}

/// Validates dimensions and returns `width * height` as a buffer length.
/// The product can overflow `i64` for dimensions that are individually valid.
#[inline]
fn checked_area(width: i64, height: i64) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|area| usize::try_from(area).ok())
        .ok_or(Error::InvalidDimension { width, height })
}

#[inline]
fn check_len(len: usize, width: i64, height: i64) -> Result<()> {
    let expected = checked_area(width, height)?;
    if len != expected {
        return Err(Error::BufferSizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Read-only view over a caller-owned byte raster.
///
/// An `Image` borrows its buffer without taking ownership; views are cheap to
/// construct and are made fresh for every evaluation call.
///
/// # Example
///
/// ```rust
/// use pixelgraph_core::Image;
///
/// let data: Vec<u8> = (0..100).collect();
/// let img = Image::new(&data, 10, 10).unwrap();
/// assert_eq!(img.sample(3, 2), 23);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    data: &'a [u8],
    width: i64,
    height: i64,
}

impl<'a> Image<'a> {
    /// Creates a view over `data` with the given dimensions.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimension`] if either dimension is non-positive;
    /// [`Error::BufferSizeMismatch`] if `data.len() != width * height`.
    pub fn new(data: &'a [u8], width: i64, height: i64) -> Result<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the view width in pixels.
    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the view height in pixels.
    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Returns the raw sample buffer.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Zero-padded read of the sample at `(x, y)`, widened to `i64`.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> i64 {
        zero_padded_read(self.data, self.width, self.height, x, y)
    }
}

/// Write-capable view over a caller-owned byte raster.
///
/// Used by the output driver for the one raster it writes. Writes are
/// unchecked by contract: the driver's iteration range equals the declared
/// dimensions, so every coordinate it writes is in range by construction.
#[derive(Debug)]
pub struct ImageMut<'a> {
    data: &'a mut [u8],
    width: i64,
    height: i64,
}

impl<'a> ImageMut<'a> {
    /// Creates a mutable view over `data` with the given dimensions.
    ///
    /// # Errors
    ///
    /// Same validation as [`Image::new`].
    pub fn new(data: &'a mut [u8], width: i64, height: i64) -> Result<Self> {
        check_len(data.len(), width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the view width in pixels.
    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the view height in pixels.
    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Writes the sample at `(x, y)` without a range check.
    ///
    /// The caller must guarantee `(x, y)` is in range.
    #[inline]
    pub fn write_at(&mut self, x: i64, y: i64, value: u8) {
        debug_assert!(
            in_bounds(self.width, self.height, x, y),
            "write out of bounds"
        );
        self.data[(y * self.width + x) as usize] = value;
    }

    /// Returns the underlying buffer for whole-row writes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

/// Owned signed 64-bit raster holding one node's materialized output.
///
/// Intermediates carry the full computed value - a convolution response can
/// far exceed the byte range, and narrowing happens only once, at the output
/// driver. A `Plane` lives exactly as long as downstream consumers still need
/// it; the materializing evaluator drops it after its last read.
#[derive(Debug, Clone)]
pub struct Plane {
    data: Vec<i64>,
    width: i64,
    height: i64,
}

impl Plane {
    /// Allocates a zero-filled plane.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimension`] if either dimension is non-positive.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let area = checked_area(width, height)?;
        Ok(Self {
            data: vec![0; area],
            width,
            height,
        })
    }

    /// Returns the plane width in pixels.
    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the plane height in pixels.
    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Zero-padded read of the value at `(x, y)`.
    ///
    /// Same boundary policy as [`Image::sample`], so a plane consumed by a
    /// downstream convolution pads exactly like an input image would.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> i64 {
        zero_padded_read(&self.data, self.width, self.height, x, y)
    }

    /// Returns the raw value buffer.
    #[inline]
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// Returns the underlying buffer for whole-row writes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [i64] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded_read_inside() {
        let data: Vec<u8> = (0..12).collect();
        assert_eq!(zero_padded_read(&data, 4, 3, 0, 0), 0);
        assert_eq!(zero_padded_read(&data, 4, 3, 3, 0), 3);
        assert_eq!(zero_padded_read(&data, 4, 3, 1, 2), 9);
    }

    #[test]
    fn test_zero_padded_read_outside() {
        let data = vec![255u8; 9];
        for &(x, y) in &[(-1, 0), (0, -1), (3, 0), (0, 3), (-5, -5), (100, 100)] {
            assert_eq!(zero_padded_read(&data, 3, 3, x, y), 0);
        }
    }

    #[test]
    fn test_zero_padded_read_widens_unsigned() {
        // 255 must widen to 255, not sign-extend to -1.
        let data = vec![255u8; 1];
        assert_eq!(zero_padded_read(&data, 1, 1, 0, 0), 255);
    }

    #[test]
    fn test_image_rejects_bad_dimensions() {
        let data = vec![0u8; 4];
        assert!(matches!(
            Image::new(&data, 0, 4),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Image::new(&data, 4, -1),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_image_rejects_overflowing_dimensions() {
        // Dimensions whose product exceeds i64 must error, not panic.
        let data = vec![0u8; 4];
        assert!(matches!(
            Image::new(&data, i64::MAX, 2),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Image::new(&data, 2, i64::MAX),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_image_rejects_wrong_buffer_size() {
        let data = vec![0u8; 5];
        assert!(matches!(
            Image::new(&data, 2, 2),
            Err(Error::BufferSizeMismatch {
                expected: 4,
                actual: 5,
            })
        ));
    }

    #[test]
    fn test_image_mut_write() {
        let mut data = vec![0u8; 4];
        let mut out = ImageMut::new(&mut data, 2, 2).unwrap();
        out.write_at(1, 1, 42);
        out.write_at(0, 1, 7);
        assert_eq!(data, vec![0, 0, 7, 42]);
    }

    #[test]
    fn test_plane_round_trip() {
        let mut plane = Plane::new(3, 2).unwrap();
        plane.data_mut()[5] = -1000;
        assert_eq!(plane.sample(2, 1), -1000);
        assert_eq!(plane.sample(3, 1), 0);
        assert_eq!(plane.sample(2, 2), 0);
    }

    #[test]
    fn test_plane_rejects_bad_dimensions() {
        assert!(matches!(
            Plane::new(-3, 2),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Plane::new(i64::MAX, 2),
            Err(Error::InvalidDimension { .. })
        ));
    }
}
