//! Split-view previews.
//!
//! A split view shows the original image on the left and the processed
//! image on the right of a vertical boundary, so an edit can be judged
//! against its source in a single frame.

use log::debug;

use crate::buffer::{ImageError, PixelBuffer};
use crate::operation::Operation;

/// Column where the processed half starts: `floor(width * percent / 100)`.
pub fn split_boundary(width: u32, split_percent: u32) -> u32 {
    (width as u64 * split_percent as u64 / 100) as u32
}

/// Render `op` over the part of `image` right of the split.
///
/// Column `x` keeps the original pixel when `x < floor(W * split_percent / 100)`
/// and takes the processed pixel otherwise. A split of 0 therefore shows
/// the fully processed image and 100 shows the untouched original.
///
/// # Errors
///
/// `InvalidArgument` if `split_percent` is outside `0..=100`, or whatever
/// `op` itself reports for out-of-range parameters.
pub fn apply_split_view(
    image: &PixelBuffer,
    op: &Operation,
    split_percent: i32,
) -> Result<PixelBuffer, ImageError> {
    if !(0..=100).contains(&split_percent) {
        return Err(ImageError::invalid(format!(
            "split percentage must be between 0 and 100, got {}",
            split_percent
        )));
    }

    let mut output = op.apply(image)?;
    image.ensure_same_dimensions(&output, "processed image")?;

    let boundary = split_boundary(image.width(), split_percent as u32);
    debug!(
        "split view {}: original for columns 0..{} of {}",
        op,
        boundary,
        image.width()
    );

    let prefix = boundary as usize * 3;
    let row_len = image.width() as usize * 3;
    for (dst, src) in output
        .as_raw_mut()
        .chunks_exact_mut(row_len)
        .zip(image.as_raw().chunks_exact(row_len))
    {
        dst[..prefix].copy_from_slice(&src[..prefix]);
    }
    Ok(output)
}
