//! Output sample narrowing.

/// How a computed `i64` value becomes an output byte.
///
/// Both behaviors exist in deployed pipelines, so the mode is an explicit
/// configuration option of the driver rather than a compile-time choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampMode {
    /// Saturate to `[0, 255]`.
    Saturate,
    /// Keep the low byte: two's-complement wraparound modulo 256.
    Truncate,
}

impl ClampMode {
    /// Narrows `value` to an output sample.
    #[inline]
    pub fn apply(self, value: i64) -> u8 {
        match self {
            ClampMode::Saturate => value.clamp(0, 255) as u8,
            ClampMode::Truncate => value as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(ClampMode::Saturate.apply(-1), 0);
        assert_eq!(ClampMode::Saturate.apply(i64::MIN), 0);
        assert_eq!(ClampMode::Saturate.apply(0), 0);
        assert_eq!(ClampMode::Saturate.apply(128), 128);
        assert_eq!(ClampMode::Saturate.apply(255), 255);
        assert_eq!(ClampMode::Saturate.apply(256), 255);
        assert_eq!(ClampMode::Saturate.apply(i64::MAX), 255);
    }

    #[test]
    fn test_truncate_wraps() {
        assert_eq!(ClampMode::Truncate.apply(0), 0);
        assert_eq!(ClampMode::Truncate.apply(255), 255);
        assert_eq!(ClampMode::Truncate.apply(256), 0);
        assert_eq!(ClampMode::Truncate.apply(300), 44);
        assert_eq!(ClampMode::Truncate.apply(-1), 255);
        assert_eq!(ClampMode::Truncate.apply(-256), 0);
    }
}
