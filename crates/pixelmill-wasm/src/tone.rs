//! Tone WASM bindings: levels adjustment and wavelet compression.

use crate::types::JsImage;
use pixelmill_core::{compress as compress_core, levels_adjust as levels_adjust_core};
use wasm_bindgen::prelude::*;

/// Remap tones with black, mid and white points.
///
/// # Arguments
/// * `image` - Source image
/// * `black` - Inputs at or below this become 0
/// * `mid` - Input that maps to 127
/// * `white` - Inputs above this become 255
///
/// # Errors
/// Throws unless `0 <= black < mid < white <= 255`.
#[wasm_bindgen]
pub fn levels_adjust(image: &JsImage, black: i32, mid: i32, white: i32) -> Result<JsImage, JsValue> {
    levels_adjust_core(image.buffer(), black, mid, white)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Lossy Haar wavelet compression.
///
/// Discards the smallest coefficients holding `percentage` percent of each
/// channel's coefficient energy, then reconstructs the image.
///
/// # Errors
/// Throws if `percentage` is outside `0..=100`.
#[wasm_bindgen]
pub fn compress(image: &JsImage, percentage: i32) -> Result<JsImage, JsValue> {
    compress_core(image.buffer(), percentage)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
