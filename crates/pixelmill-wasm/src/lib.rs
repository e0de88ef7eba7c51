//! Pixelmill WASM - WebAssembly bindings for Pixelmill
//!
//! This crate provides WASM bindings to expose the pixelmill-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsImage`, the RGB image handle passed between bindings
//! - `transform` - Color transforms, filters, flips and channel tools
//! - `histogram` - Histograms, color correction and chart rendering
//! - `tone` - Levels adjustment and wavelet compression
//! - `composite` - Operations by name or JSON, split view and masks
//! - `console` - Routes engine log output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImage, apply_split_view } from '@pixelmill/wasm';
//!
//! await init();
//!
//! const image = new JsImage(width, height, rgbBytes);
//! const preview = apply_split_view(image, { op: "sepia" }, 50);
//! const bytes = preview.pixels();
//! ```

use wasm_bindgen::prelude::*;

mod composite;
mod console;
mod histogram;
mod tone;
mod transform;
mod types;

// Re-export public types
pub use composite::{
    apply_command, apply_operation, apply_split_view, apply_split_view_command, apply_with_mask,
};
pub use console::set_log_level;
pub use histogram::{color_correct, compute_histogram, histogram_image, JsHistogram};
pub use tone::{compress, levels_adjust};
pub use transform::{
    blur, brighten, combine_rgb, downscale, flip_horizontal, flip_vertical, grayscale, sepia,
    sharpen, split_rgb, visualize_blue, visualize_green, visualize_intensity, visualize_luma,
    visualize_red, visualize_value,
};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
