//! Splitting an image into per-channel images and recombining them.

use crate::buffer::{Channel, ImageError, PixelBuffer};
use crate::transform::color::visualize_channel;

/// Split into three full-size images `[red, green, blue]`, each holding only
/// its own channel with the other two zeroed.
pub fn split_rgb(image: &PixelBuffer) -> [PixelBuffer; 3] {
    Channel::ALL.map(|channel| visualize_channel(image, channel))
}

/// Rebuild an image taking R from `red`, G from `green` and B from `blue`.
///
/// # Errors
///
/// `InvalidArgument` if the three images do not share dimensions.
pub fn combine_rgb(
    red: &PixelBuffer,
    green: &PixelBuffer,
    blue: &PixelBuffer,
) -> Result<PixelBuffer, ImageError> {
    red.ensure_same_dimensions(green, "green image")?;
    red.ensure_same_dimensions(blue, "blue image")?;

    let mut output = red.blank_like();
    for (((dst, r), g), b) in output
        .pixels_mut()
        .zip(red.pixels())
        .zip(green.pixels())
        .zip(blue.pixels())
    {
        dst.copy_from_slice(&[r[0], g[1], b[2]]);
    }
    Ok(output)
}
