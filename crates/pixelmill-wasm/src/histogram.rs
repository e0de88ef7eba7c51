//! Histogram WASM bindings.
//!
//! This module exposes per-channel histograms, color correction and the
//! histogram chart renderer to JavaScript.

use crate::types::JsImage;
use pixelmill_core::histogram::{self, Histogram};
use pixelmill_core::Channel;
use wasm_bindgen::prelude::*;

/// Histogram result accessible from JavaScript.
///
/// Contains 256-bin histograms for the red, green and blue channels,
/// plus per-channel maxima and peaks. Each channel is normalized by its own
/// maximum when drawn, so there is no shared scale.
#[wasm_bindgen]
pub struct JsHistogram {
    inner: Histogram,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel histogram (256 bins).
    pub fn red(&self) -> Vec<u32> {
        self.inner.red.to_vec()
    }

    /// Get green channel histogram (256 bins).
    pub fn green(&self) -> Vec<u32> {
        self.inner.green.to_vec()
    }

    /// Get blue channel histogram (256 bins).
    pub fn blue(&self) -> Vec<u32> {
        self.inner.blue.to_vec()
    }

    /// Largest red bin; scale the red curve by this.
    #[wasm_bindgen(getter)]
    pub fn red_max(&self) -> u32 {
        self.inner.channel_max(Channel::Red)
    }

    #[wasm_bindgen(getter)]
    pub fn green_max(&self) -> u32 {
        self.inner.channel_max(Channel::Green)
    }

    #[wasm_bindgen(getter)]
    pub fn blue_max(&self) -> u32 {
        self.inner.channel_max(Channel::Blue)
    }

    /// Most populated value of each channel as `[red, green, blue]`.
    pub fn peaks(&self) -> Vec<u8> {
        self.inner.peaks().to_vec()
    }

    /// Plain object `{ red, green, blue }` of bin arrays.
    ///
    /// # Errors
    /// Throws if the conversion to a JavaScript value fails.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Draw this histogram as a 256x256 chart.
    pub fn render(&self) -> JsImage {
        JsImage::from_buffer(histogram::render_histogram(&self.inner))
    }
}

/// Compute the per-channel histogram of an image.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image);
/// const redBins = hist.red();        // Uint32Array[256]
/// const redScale = hist.red_max;     // Normalize each channel on its own
/// const [r, g, b] = hist.peaks();
///
/// // Don't forget to free!
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsImage) -> JsHistogram {
    JsHistogram {
        inner: histogram::compute_histogram(image.buffer()),
    }
}

/// Shift each channel so its peak lands on the mean of the three peaks.
#[wasm_bindgen]
pub fn color_correct(image: &JsImage) -> JsImage {
    JsImage::from_buffer(histogram::color_correct(image.buffer()))
}

/// Render the histogram chart of an image in one call.
#[wasm_bindgen]
pub fn histogram_image(image: &JsImage) -> JsImage {
    JsImage::from_buffer(histogram::histogram_image(image.buffer()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_histogram_creation() {
        let img = JsImage::new(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let hist = compute_histogram(&img);

        assert_eq!(hist.red().len(), 256);
        assert_eq!(hist.green().len(), 256);
        assert_eq!(hist.blue().len(), 256);
        assert_eq!(hist.red()[255], 1);
        assert_eq!(hist.red()[0], 2);
    }

    #[test]
    fn test_js_histogram_bins_and_peaks() {
        let pixels = vec![128, 128, 128, 128, 128, 128, 128, 128, 128, 200, 200, 200];
        let hist = compute_histogram(&JsImage::new(4, 1, pixels).unwrap());

        assert_eq!(hist.red_max(), 3); // 3 pixels at value 128
        assert_eq!(hist.red()[128], 3);
        assert_eq!(hist.red()[200], 1);
        assert_eq!(hist.peaks(), vec![128, 128, 128]);
    }

    #[test]
    fn test_js_histogram_channel_max() {
        let pixels = vec![10, 20, 30, 10, 21, 30];
        let hist = compute_histogram(&JsImage::new(2, 1, pixels).unwrap());

        assert_eq!(hist.red_max(), 2);
        assert_eq!(hist.green_max(), 1);
        assert_eq!(hist.blue_max(), 2);
    }

    #[test]
    fn test_js_histogram_maxima_are_independent() {
        // Red is concentrated in one bin, green spread over three
        let pixels = vec![64, 10, 0, 64, 20, 0, 64, 30, 0];
        let hist = compute_histogram(&JsImage::new(3, 1, pixels).unwrap());

        assert_eq!(hist.red_max(), 3);
        assert_eq!(hist.green_max(), 1);
        assert_eq!(hist.blue_max(), 3);
    }

    #[test]
    fn test_render_dimensions() {
        let img = JsImage::new(2, 1, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let chart = histogram_image(&img);
        assert_eq!(chart.width(), 256);
        assert_eq!(chart.height(), 256);
        assert_eq!(compute_histogram(&img).render().pixels(), chart.pixels());
    }

    #[test]
    fn test_color_correct_binding() {
        let img = JsImage::new(1, 1, vec![100, 130, 160]).unwrap();
        assert_eq!(color_correct(&img).pixels(), vec![130, 130, 130]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_to_json_round_trip() {
        let img = JsImage::new(2, 1, vec![1, 2, 3, 1, 2, 4]).unwrap();
        let hist = compute_histogram(&img);
        let value = hist.to_json().unwrap();
        let back: Histogram = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(back.red[1], 2);
        assert_eq!(back.blue[4], 1);
    }
}
