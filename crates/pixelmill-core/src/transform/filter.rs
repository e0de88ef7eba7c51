//! Whole-image convolution filters.
//!
//! Both filters use [`BorderPolicy::SkipMargin`]: the outer ring of
//! `kernel.size() / 2` pixels is copied from the source unconvolved.

use crate::buffer::PixelBuffer;
use crate::kernel::{convolve, BorderPolicy, Kernel};

/// 3x3 normalized blur.
pub fn blur(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &Kernel::blur(), BorderPolicy::SkipMargin)
}

/// 5x5 sharpen.
pub fn sharpen(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &Kernel::sharpen(), BorderPolicy::SkipMargin)
}
