//! Luma, intensity and value calculations.
//!
//! Shared by the grayscale matrix, the component visualizations and the
//! mask-gated grayscale operation so they all agree on the same numbers.

use crate::buffer::Rgb;

/// ITU-R BT.709 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.0722;

/// Weighted BT.709 luma of a pixel, unrounded.
#[inline]
pub fn luma(rgb: Rgb) -> f64 {
    LUMA_R * rgb[0] as f64 + LUMA_G * rgb[1] as f64 + LUMA_B * rgb[2] as f64
}

/// Luma truncated toward zero.
///
/// Truncation (not rounding) is the established behavior of the luma
/// visualization; callers comparing against a rounded reference should
/// allow a difference of one.
#[inline]
pub fn luma_u8(rgb: Rgb) -> u8 {
    luma(rgb).clamp(0.0, 255.0) as u8
}

/// Integer mean of the three channels, truncated.
#[inline]
pub fn intensity(rgb: Rgb) -> u8 {
    ((rgb[0] as u16 + rgb[1] as u16 + rgb[2] as u16) / 3) as u8
}

/// Largest of the three channels.
#[inline]
pub fn value(rgb: Rgb) -> u8 {
    rgb[0].max(rgb[1]).max(rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-9, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_black_and_white() {
        assert_eq!(luma_u8([0, 0, 0]), 0);
        // 255 * (sum of weights) may land a hair under 255 before truncation
        assert!(luma_u8([255, 255, 255]) >= 254);
    }

    #[test]
    fn test_luma_truncates() {
        // 0.2126 * 255 = 54.213 -> 54
        assert_eq!(luma_u8([255, 0, 0]), 54);
        // 0.7152 * 255 = 182.376 -> 182
        assert_eq!(luma_u8([0, 255, 0]), 182);
        // 0.0722 * 255 = 18.411 -> 18
        assert_eq!(luma_u8([0, 0, 255]), 18);
    }

    #[test]
    fn test_luma_gray_within_one() {
        for v in [0u8, 64, 128, 192, 255] {
            let l = luma_u8([v, v, v]);
            assert!(
                (l as i32 - v as i32).abs() <= 1,
                "Gray {} should produce luma ~{}, got {}",
                v,
                v,
                l
            );
        }
    }

    #[test]
    fn test_intensity_truncates() {
        assert_eq!(intensity([1, 1, 2]), 1);
        assert_eq!(intensity([255, 255, 255]), 255);
        assert_eq!(intensity([10, 20, 31]), 20);
    }

    #[test]
    fn test_value_is_max() {
        assert_eq!(value([12, 200, 7]), 200);
        assert_eq!(value([0, 0, 0]), 0);
    }
}
