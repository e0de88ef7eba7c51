//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixelmill
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixelmill_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// This type wraps the core `PixelBuffer` and provides a JavaScript-friendly
/// interface for accessing image dimensions and pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. Chains of operations
/// should pass `JsImage` values between bindings and only extract pixels at
/// the end.
#[wasm_bindgen]
pub struct JsImage {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// # Errors
    /// Throws if a dimension is zero or the data length is not
    /// `width * height * 3`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        let inner = PixelBuffer::from_raw(width, height, pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsImage { inner })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_raw().len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_raw().to_vec()
    }

    /// Deep copy, independent of this image.
    #[wasm_bindgen(js_name = clone)]
    pub fn duplicate(&self) -> JsImage {
        JsImage {
            inner: self.inner.clone(),
        }
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImage {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_creation() {
        let img = JsImage::new(100, 50, vec![0u8; 100 * 50 * 3]).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_image_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsImage::new(2, 1, pixels.clone()).unwrap();
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let img = JsImage::new(1, 1, vec![1, 2, 3]).unwrap();
        let copy = img.duplicate();
        assert_eq!(copy.pixels(), img.pixels());
        assert_eq!(copy.buffer(), img.buffer());
    }

    #[test]
    fn test_from_buffer() {
        let buffer = PixelBuffer::filled(20, 10, [9, 9, 9]).unwrap();
        let js_img = JsImage::from_buffer(buffer);
        assert_eq!(js_img.width(), 20);
        assert_eq!(js_img.height(), 10);
        assert_eq!(js_img.byte_length(), 600);
    }
}
