//! Geometric operations: mirroring and nearest-neighbor downscaling.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - `x` grows to the right, `y` grows downward

use crate::buffer::{ImageError, PixelBuffer};

/// Mirror the image left-to-right: `(x, y) -> (W - 1 - x, y)`.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.width() as usize * 3;
    let mut output = image.blank_like();

    for (dst_row, src_row) in output
        .as_raw_mut()
        .chunks_exact_mut(row_len)
        .zip(image.as_raw().chunks_exact(row_len))
    {
        for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3).rev()) {
            dst.copy_from_slice(src);
        }
    }
    output
}

/// Mirror the image top-to-bottom: `(x, y) -> (x, H - 1 - y)`.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let row_len = image.width() as usize * 3;
    let mut output = image.blank_like();

    // Copy whole rows bottom-up
    for (dst_row, src_row) in output
        .as_raw_mut()
        .chunks_exact_mut(row_len)
        .zip(image.as_raw().chunks_exact(row_len).rev())
    {
        dst_row.copy_from_slice(src_row);
    }
    output
}

/// Nearest-neighbor downscale to `new_width x new_height`.
///
/// Target pixel `(x, y)` samples source pixel
/// `(floor(x * W / new_width), floor(y * H / new_height))`.
///
/// # Errors
///
/// `InvalidArgument` if a target dimension is zero or larger than the
/// source dimension.
pub fn downscale(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> Result<PixelBuffer, ImageError> {
    let (src_w, src_h) = image.dimensions();
    if new_width == 0 || new_height == 0 {
        return Err(ImageError::invalid(format!(
            "downscale target must be positive, got {}x{}",
            new_width, new_height
        )));
    }
    if new_width > src_w || new_height > src_h {
        return Err(ImageError::invalid(format!(
            "downscale target {}x{} exceeds source {}x{}",
            new_width, new_height, src_w, src_h
        )));
    }

    // Fast path: same size returns a copy
    if new_width == src_w && new_height == src_h {
        return Ok(image.clone());
    }

    let mut output = PixelBuffer::blank(new_width, new_height);
    for y in 0..new_height {
        let src_y = (y as u64 * src_h as u64 / new_height as u64) as u32;
        for x in 0..new_width {
            let src_x = (x as u64 * src_w as u64 / new_width as u64) as u32;
            output.put(x, y, image.pixel(src_x, src_y));
        }
    }
    Ok(output)
}
