//! Levels adjustment: piecewise-linear tone remapping through a lookup table.
//!
//! Three control points split the input range:
//!
//! | Input            | Output                                |
//! |------------------|---------------------------------------|
//! | `v <= b`         | 0                                     |
//! | `b < v <= m`     | `round((v - b) * 127 / (m - b))`      |
//! | `m < v <= w`     | `round((v - m) * 128 / (w - m) + 127)`|
//! | `v > w`          | 255                                   |
//!
//! The mid point maps to 127, so a mid-gray pixel at `m = 128` comes out one
//! level darker.

use log::debug;

use crate::buffer::{ImageError, PixelBuffer};

// ============================================================================
// LUT Type
// ============================================================================

/// Pre-computed 256-entry lookup table for a levels adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelsLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl LevelsLut {
    /// Build the table for black point `b`, mid point `m` and white point `w`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `0 <= b < m < w <= 255`.
    pub fn new(black: i32, mid: i32, white: i32) -> Result<Self, ImageError> {
        if !(0 <= black && black < mid && mid < white && white <= 255) {
            return Err(ImageError::invalid(format!(
                "levels must satisfy 0 <= black < mid < white <= 255, got ({}, {}, {})",
                black, mid, white
            )));
        }

        let (b, m, w) = (black as f64, mid as f64, white as f64);
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            let v = i as f64;
            let out = if v <= b {
                0.0
            } else if v <= m {
                ((v - b) * 127.0 / (m - b)).round()
            } else if v <= w {
                ((v - m) * 128.0 / (w - m) + 127.0).round()
            } else {
                255.0
            };
            *lut_value = out.clamp(0.0, 255.0) as u8;
        }
        Ok(Self { lut })
    }

    /// Look up one channel value.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Apply the table to every channel of every pixel, returning a new image.
    pub fn apply(&self, image: &PixelBuffer) -> PixelBuffer {
        let mut output = image.clone();
        if self.is_identity() {
            return output;
        }
        for value in output.as_raw_mut() {
            *value = self.map(*value);
        }
        output
    }
}

/// Remap the tones of `image` with black, mid and white points.
///
/// # Arguments
///
/// * `image` - Source image
/// * `black` - Inputs at or below this become 0
/// * `mid` - Input that maps to 127
/// * `white` - Inputs above this become 255
///
/// # Errors
///
/// `InvalidArgument` unless `0 <= black < mid < white <= 255`. Validation
/// happens before any output is produced.
pub fn levels_adjust(
    image: &PixelBuffer,
    black: i32,
    mid: i32,
    white: i32,
) -> Result<PixelBuffer, ImageError> {
    let lut = LevelsLut::new(black, mid, white)?;
    debug!("levels adjust: black {}, mid {}, white {}", black, mid, white);
    Ok(lut.apply(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test_log::test]
    fn test_mid_gray_off_by_one() {
        let img = PixelBuffer::filled(4, 4, [128, 128, 128]).unwrap();
        let out = levels_adjust(&img, 0, 128, 255).unwrap();
        assert!(out.pixels().all(|p| p == [127, 127, 127]));
    }

    #[test]
    fn test_default_points_are_identity() {
        let lut = LevelsLut::new(0, 127, 255).unwrap();
        assert!(lut.is_identity());
    }

    #[test]
    fn test_segments() {
        let lut = LevelsLut::new(20, 100, 200).unwrap();
        assert_eq!(lut.map(0), 0);
        assert_eq!(lut.map(20), 0);
        assert_eq!(lut.map(100), 127);
        assert_eq!(lut.map(200), 255);
        assert_eq!(lut.map(201), 255);
        // (60 - 20) * 127 / 80 = 63.5 -> 64
        assert_eq!(lut.map(60), 64);
        // (150 - 100) * 128 / 100 + 127 = 191
        assert_eq!(lut.map(150), 191);
    }

    #[test]
    fn test_lut_monotonic() {
        let lut = LevelsLut::new(30, 90, 220).unwrap();
        for i in 1..256 {
            assert!(lut.lut[i] >= lut.lut[i - 1], "Not monotonic at {}", i);
        }
    }

    #[test]
    fn test_misordered_levels_rejected() {
        let img = PixelBuffer::new(2, 2).unwrap();
        assert!(matches!(
            levels_adjust(&img, 50, 20, 3),
            Err(ImageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_out_of_range_levels_rejected() {
        assert!(LevelsLut::new(-1, 100, 200).is_err());
        assert!(LevelsLut::new(0, 100, 256).is_err());
        assert!(LevelsLut::new(10, 10, 200).is_err());
        assert!(LevelsLut::new(10, 200, 200).is_err());
        assert!(LevelsLut::new(0, 1, 2).is_ok());
    }

    #[test]
    fn test_applies_to_every_channel() {
        let img = PixelBuffer::filled(1, 1, [20, 100, 200]).unwrap();
        let out = levels_adjust(&img, 20, 100, 200).unwrap();
        assert_eq!(out.get_pixel(0, 0).unwrap(), [0, 127, 255]);
    }

    proptest! {
        /// Property: The default points leave any image unchanged.
        #[test]
        fn prop_default_levels_identity(
            pixels in (1usize..=32).prop_flat_map(|n| proptest::collection::vec(any::<u8>(), n * 3))
        ) {
            let img = PixelBuffer::from_raw((pixels.len() / 3) as u32, 1, pixels).unwrap();
            prop_assert_eq!(levels_adjust(&img, 0, 127, 255).unwrap(), img);
        }

        /// Property: Any valid triple produces a monotonic table pinned at both ends.
        #[test]
        fn prop_valid_levels_monotonic(b in 0i32..=100, dm in 1i32..=70, dw in 1i32..=80) {
            let lut = LevelsLut::new(b, b + dm, b + dm + dw).unwrap();
            prop_assert_eq!(lut.map(0), 0);
            prop_assert_eq!(lut.map(255), 255);
            for i in 1..256 {
                prop_assert!(lut.lut[i] >= lut.lut[i - 1]);
            }
        }
    }
}
