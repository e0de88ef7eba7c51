//! WASM bindings for the standard transform library.
//!
//! Every binding borrows its input image and returns a new one, so a
//! JavaScript caller can keep the original for undo or split views.

use crate::types::JsImage;
use pixelmill_core::transform;
use wasm_bindgen::prelude::*;

/// Convert to grayscale (BT.709 luma on all channels).
#[wasm_bindgen]
pub fn grayscale(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::grayscale(image.buffer()))
}

/// Apply a sepia tone.
#[wasm_bindgen]
pub fn sepia(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::sepia(image.buffer()))
}

/// Add `increment` to every channel; negative values darken.
#[wasm_bindgen]
pub fn brighten(image: &JsImage, increment: i32) -> JsImage {
    JsImage::from_buffer(transform::brighten(image.buffer(), increment))
}

/// Mirror left-to-right.
#[wasm_bindgen]
pub fn flip_horizontal(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::flip_horizontal(image.buffer()))
}

/// Mirror top-to-bottom.
#[wasm_bindgen]
pub fn flip_vertical(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::flip_vertical(image.buffer()))
}

/// 3x3 blur; the one-pixel border is left unchanged.
#[wasm_bindgen]
pub fn blur(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::blur(image.buffer()))
}

/// 5x5 sharpen; the two-pixel border is left unchanged.
#[wasm_bindgen]
pub fn sharpen(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::sharpen(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_red(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_red(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_green(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_green(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_blue(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_blue(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_value(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_value(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_intensity(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_intensity(image.buffer()))
}

#[wasm_bindgen]
pub fn visualize_luma(image: &JsImage) -> JsImage {
    JsImage::from_buffer(transform::visualize_luma(image.buffer()))
}

/// Split into `[red, green, blue]` images, each holding only its channel.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const [r, g, b] = split_rgb(image);
/// const back = combine_rgb(r, g, b);
/// ```
#[wasm_bindgen]
pub fn split_rgb(image: &JsImage) -> js_sys::Array {
    transform::split_rgb(image.buffer())
        .into_iter()
        .map(|channel| JsValue::from(JsImage::from_buffer(channel)))
        .collect()
}

/// Rebuild an image from the R of `red`, G of `green` and B of `blue`.
///
/// # Errors
/// Throws if the three images differ in size.
#[wasm_bindgen]
pub fn combine_rgb(red: &JsImage, green: &JsImage, blue: &JsImage) -> Result<JsImage, JsValue> {
    transform::combine_rgb(red.buffer(), green.buffer(), blue.buffer())
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Nearest-neighbor downscale.
///
/// # Errors
/// Throws if a target dimension is zero or larger than the source.
#[wasm_bindgen]
pub fn downscale(image: &JsImage, new_width: u32, new_height: u32) -> Result<JsImage, JsValue> {
    transform::downscale(image.buffer(), new_width, new_height)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
