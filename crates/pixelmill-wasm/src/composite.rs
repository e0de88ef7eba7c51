//! Operation, split-view and mask WASM bindings.
//!
//! Operations cross the boundary in two shapes: a command name with integer
//! operands (`"brighten", [40]`), or a JSON object passed via
//! serde_wasm_bindgen:
//!
//! ```typescript
//! apply_operation(image, { op: "levels-adjust", black: 20, mid: 100, white: 230 });
//! ```

use crate::types::JsImage;
use pixelmill_core::{
    apply_split_view as apply_split_view_core, apply_with_mask as apply_with_mask_core,
    MaskOperation, Operation,
};
use wasm_bindgen::prelude::*;

fn operation_from_js(op: JsValue) -> Result<Operation, JsValue> {
    serde_wasm_bindgen::from_value(op)
        .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))
}

fn operation_from_command(name: &str, args: &[i32]) -> Result<Operation, JsValue> {
    Operation::parse(name, args).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run a JSON-described operation over the whole image.
///
/// # Errors
/// Throws if the object is not a known operation or its parameters are out
/// of range.
#[wasm_bindgen]
pub fn apply_operation(image: &JsImage, op: JsValue) -> Result<JsImage, JsValue> {
    let op = operation_from_js(op)?;
    op.apply(image.buffer())
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run a command such as `brighten 40` over the whole image.
///
/// # Arguments
/// * `name` - Command name, e.g. `"levels-adjust"`
/// * `args` - Integer operands in command order
///
/// # Errors
/// Throws for an unknown name, a wrong operand count, or out-of-range
/// operands.
#[wasm_bindgen]
pub fn apply_command(image: &JsImage, name: &str, args: Vec<i32>) -> Result<JsImage, JsValue> {
    let op = operation_from_command(name, &args)?;
    op.apply(image.buffer())
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Preview a JSON-described operation next to the original.
///
/// Columns left of `split_percent` percent of the width keep the original
/// pixels; the rest show the processed image.
///
/// # Errors
/// Throws if `split_percent` is outside `0..=100` or the operation is
/// invalid.
#[wasm_bindgen]
pub fn apply_split_view(image: &JsImage, op: JsValue, split_percent: i32) -> Result<JsImage, JsValue> {
    let op = operation_from_js(op)?;
    apply_split_view_core(image.buffer(), &op, split_percent)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Split-view preview for a command name and operands.
#[wasm_bindgen]
pub fn apply_split_view_command(
    image: &JsImage,
    name: &str,
    args: Vec<i32>,
    split_percent: i32,
) -> Result<JsImage, JsValue> {
    let op = operation_from_command(name, &args)?;
    apply_split_view_core(image.buffer(), &op, split_percent)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply a mask operation wherever `mask` is near-black.
///
/// # Arguments
/// * `image` - Source image
/// * `mask` - Same-sized image; pixels with every channel below 10 are selected
/// * `op_name` - One of `grayscale`, `sepia`, `red-component`,
///   `green-component`, `blue-component`, `blur`, `sharpen`
///
/// # Errors
/// Throws for an unknown operation name or a mask of a different size.
#[wasm_bindgen]
pub fn apply_with_mask(image: &JsImage, mask: &JsImage, op_name: &str) -> Result<JsImage, JsValue> {
    let op: MaskOperation = op_name
        .parse()
        .map_err(|e: pixelmill_core::ImageError| JsValue::from_str(&e.to_string()))?;
    apply_with_mask_core(image.buffer(), mask.buffer(), op)
        .map(JsImage::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsImage {
        let pixels = (0..20u8).flat_map(|i| [i * 12, 200 - i * 5, 64]).collect();
        JsImage::new(5, 4, pixels).unwrap()
    }

    #[test]
    fn test_apply_command_matches_core() {
        let img = sample();
        let out = apply_command(&img, "brighten", vec![40]).unwrap();
        let expected = Operation::Brighten { increment: 40 }
            .apply(img.buffer())
            .unwrap();
        assert_eq!(out.buffer(), &expected);
    }

    #[test]
    fn test_split_view_full_original() {
        let img = sample();
        let out = apply_split_view_command(&img, "grayscale", vec![], 100).unwrap();
        assert_eq!(out.pixels(), img.pixels());
    }

    #[test]
    fn test_split_view_zero_is_processed() {
        let img = sample();
        let out = apply_split_view_command(&img, "sepia", vec![], 0).unwrap();
        let full = apply_command(&img, "sepia", vec![]).unwrap();
        assert_eq!(out.pixels(), full.pixels());
    }

    #[test]
    fn test_apply_with_mask_white_mask_no_change() {
        let img = sample();
        let mask = JsImage::new(5, 4, vec![255; 60]).unwrap();
        let out = apply_with_mask(&img, &mask, "grayscale").unwrap();
        assert_eq!(out.pixels(), img.pixels());
    }

    #[test]
    fn test_apply_with_mask_black_mask_pixel_op() {
        let img = sample();
        let mask = JsImage::new(5, 4, vec![0; 60]).unwrap();
        let out = apply_with_mask(&img, &mask, "red-component").unwrap();
        let full = apply_command(&img, "red-component", vec![]).unwrap();
        assert_eq!(out.pixels(), full.pixels());
    }
}
