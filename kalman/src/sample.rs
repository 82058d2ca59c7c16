//! Numeric representations of a single pixel sample.

/// A pixel channel value the filter bank can read and write back.
///
/// Filtering happens in `f32`; writing back clamps to the legal range of the
/// representation. Integer types round to nearest, `f32` samples are
/// normalized to `[0, 1]`.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Lower bound of the legal range, in the filter domain.
    const LOWER: f32;
    /// Upper bound of the legal range, in the filter domain.
    const UPPER: f32;

    fn to_f32(self) -> f32;

    /// Clamps `value` into `[LOWER, UPPER]` and converts. NaN maps to `LOWER`.
    fn from_f32_clamped(value: f32) -> Self;
}

impl Sample for u8 {
    const LOWER: f32 = u8::MIN as f32;
    const UPPER: f32 = u8::MAX as f32;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32_clamped(value: f32) -> Self {
        // `as` saturates and maps NaN to 0
        value.clamp(Self::LOWER, Self::UPPER).round() as u8
    }
}

impl Sample for u16 {
    const LOWER: f32 = u16::MIN as f32;
    const UPPER: f32 = u16::MAX as f32;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32_clamped(value: f32) -> Self {
        value.clamp(Self::LOWER, Self::UPPER).round() as u16
    }
}

impl Sample for f32 {
    const LOWER: f32 = 0.0;
    const UPPER: f32 = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32_clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::LOWER
        } else {
            value.clamp(Self::LOWER, Self::UPPER)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_clamps_to_range() {
        assert_eq!(u8::from_f32_clamped(300.0), 255);
        assert_eq!(u8::from_f32_clamped(-12.0), 0);
        assert_eq!(u8::from_f32_clamped(127.4), 127);
        assert_eq!(u8::from_f32_clamped(127.6), 128);
        assert_eq!(u8::from_f32_clamped(f32::INFINITY), 255);
        assert_eq!(u8::from_f32_clamped(f32::NAN), 0);
    }

    #[test]
    fn test_u16_clamps_to_range() {
        assert_eq!(u16::from_f32_clamped(70_000.0), u16::MAX);
        assert_eq!(u16::from_f32_clamped(-1.0), 0);
        assert_eq!(u16::from_f32_clamped(1234.0), 1234);
    }

    #[test]
    fn test_f32_is_normalized() {
        assert_eq!(f32::from_f32_clamped(1.5), 1.0);
        assert_eq!(f32::from_f32_clamped(-0.5), 0.0);
        assert_eq!(f32::from_f32_clamped(0.25), 0.25);
        assert_eq!(f32::from_f32_clamped(f32::NAN), 0.0);
    }

    #[test]
    fn test_to_f32_is_exact() {
        for v in [0u8, 1, 128, 255] {
            assert_eq!(u8::from_f32_clamped(v.to_f32()), v);
        }
        for v in [0u16, 1, 40_000, u16::MAX] {
            assert_eq!(u16::from_f32_clamped(v.to_f32()), v);
        }
    }
}
