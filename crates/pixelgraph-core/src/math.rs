//! Numeric building blocks exposed to composed evaluators.

/// Truncated integer square root.
///
/// Computed as a floating-point square root narrowed back to `i64`, which
/// truncates toward zero - so `integer_sqrt(2) == 1`, not 2. This matches the
/// rounding of the original runtime primitive and is deliberately *not* a
/// bit-exact integer algorithm.
///
/// Negative inputs yield 0 (the float cast saturates NaN to 0).
///
/// # Example
///
/// ```rust
/// use pixelgraph_core::integer_sqrt;
///
/// assert_eq!(integer_sqrt(0), 0);
/// assert_eq!(integer_sqrt(2), 1);
/// assert_eq!(integer_sqrt(4), 2);
/// ```
#[inline]
pub fn integer_sqrt(n: i64) -> i64 {
    (n as f64).sqrt() as i64
}
