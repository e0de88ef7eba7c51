//! Mask-gated application of a single-pixel transform.

use log::debug;

use super::{is_selected, MaskOperation};
use crate::buffer::{ImageError, PixelBuffer};

/// Apply `op` wherever `mask` is near-black, copying `source` elsewhere.
///
/// # Arguments
/// * `source` - Image to transform
/// * `mask` - Selection image; must match `source` dimensions
/// * `op` - Transform evaluated at each selected pixel
///
/// # Algorithm
/// For each pixel `(x, y)`:
/// 1. If every channel of `mask(x, y)` is below the threshold, write
///    the transformed pixel (see [`MaskOperation::apply_at`])
/// 2. Otherwise copy `source(x, y)`
///
/// Neighborhoods are always read from `source`, so results do not depend on
/// the order pixels are visited.
///
/// # Errors
/// `InvalidArgument` if the mask dimensions differ from the source.
pub fn apply_with_mask(
    source: &PixelBuffer,
    mask: &PixelBuffer,
    op: MaskOperation,
) -> Result<PixelBuffer, ImageError> {
    source.ensure_same_dimensions(mask, "mask")?;

    let kernel = op.kernel();
    let mut output = source.clone();
    let mut selected = 0usize;
    for y in 0..source.height() {
        for x in 0..source.width() {
            if !is_selected(mask.pixel(x, y)) {
                continue;
            }
            output.put(x, y, op.evaluate(kernel.as_ref(), source, x, y));
            selected += 1;
        }
    }

    debug!(
        "mask {}: {} of {} pixels selected",
        op,
        selected,
        source.pixel_count()
    );
    Ok(output)
}
