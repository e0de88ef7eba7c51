//! Per-pixel color transforms and component visualizations.

use crate::buffer::{Channel, PixelBuffer};
use crate::kernel::{apply_color_matrix, clamp_channel, map_pixels, ColorMatrix};
use crate::luminance;

/// Convert to grayscale using BT.709 luma weights on all three channels.
pub fn grayscale(image: &PixelBuffer) -> PixelBuffer {
    apply_color_matrix(image, &ColorMatrix::GRAYSCALE)
}

/// Apply a sepia tone.
pub fn sepia(image: &PixelBuffer) -> PixelBuffer {
    apply_color_matrix(image, &ColorMatrix::SEPIA)
}

/// Add `increment` to every channel, saturating at 0 and 255.
///
/// A negative increment darkens the image.
pub fn brighten(image: &PixelBuffer, increment: i32) -> PixelBuffer {
    map_pixels(image, |rgb| {
        rgb.map(|v| clamp_channel((v as i32).saturating_add(increment)))
    })
}

/// Keep one channel and zero the other two.
pub fn visualize_channel(image: &PixelBuffer, channel: Channel) -> PixelBuffer {
    map_pixels(image, |rgb| channel.isolate(rgb[channel.index()]))
}

/// Red component only.
pub fn visualize_red(image: &PixelBuffer) -> PixelBuffer {
    visualize_channel(image, Channel::Red)
}

/// Green component only.
pub fn visualize_green(image: &PixelBuffer) -> PixelBuffer {
    visualize_channel(image, Channel::Green)
}

/// Blue component only.
pub fn visualize_blue(image: &PixelBuffer) -> PixelBuffer {
    visualize_channel(image, Channel::Blue)
}

/// Each channel becomes `max(R, G, B)`.
pub fn visualize_value(image: &PixelBuffer) -> PixelBuffer {
    map_pixels(image, |rgb| [luminance::value(rgb); 3])
}

/// Each channel becomes the truncated mean `(R + G + B) / 3`.
pub fn visualize_intensity(image: &PixelBuffer) -> PixelBuffer {
    map_pixels(image, |rgb| [luminance::intensity(rgb); 3])
}

/// Each channel becomes the truncated BT.709 luma.
pub fn visualize_luma(image: &PixelBuffer) -> PixelBuffer {
    map_pixels(image, |rgb| [luminance::luma_u8(rgb); 3])
}
