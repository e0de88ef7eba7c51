//! Transform primitives: per-pixel maps, color matrices and convolution.
//!
//! Everything in `transform`, `mask` and `composite` is built from these.
//!
//! ## Border policies
//!
//! Two ways of handling pixels whose neighborhood leaves the image:
//! - [`BorderPolicy::SkipMargin`]: whole-image blur/sharpen leave a border
//!   ring of `size / 2` pixels untouched.
//! - [`BorderPolicy::ReplicateEdge`]: per-pixel application clamps neighbor
//!   coordinates to the nearest valid row/column.

use crate::buffer::{ImageError, PixelBuffer, Rgb};
use crate::luminance::{LUMA_B, LUMA_G, LUMA_R};

/// Clamp an integer channel value to [0, 255].
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Round a floating-point channel value to nearest and clamp to [0, 255].
#[inline]
pub fn clamp_channel_f32(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply `f` to every pixel, producing a new buffer of the same size.
pub fn map_pixels<F>(image: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(Rgb) -> Rgb,
{
    let mut output = image.clone();
    for chunk in output.pixels_mut() {
        let rgb = f([chunk[0], chunk[1], chunk[2]]);
        chunk.copy_from_slice(&rgb);
    }
    output
}

// ============================================================================
// Color Matrix
// ============================================================================

/// A 3x3 affine weighting of (R, G, B).
///
/// Row `i` holds the weights producing output channel `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// BT.709 luma on all three outputs.
    pub const GRAYSCALE: ColorMatrix = ColorMatrix([
        [LUMA_R, LUMA_G, LUMA_B],
        [LUMA_R, LUMA_G, LUMA_B],
        [LUMA_R, LUMA_G, LUMA_B],
    ]);

    /// Classic sepia tone.
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// Transform one pixel. Each weighted sum is truncated toward zero and
    /// then saturated into [0, 255].
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let (r, g, b) = (rgb[0] as f64, rgb[1] as f64, rgb[2] as f64);
        let mut out = [0u8; 3];
        for (value, w) in out.iter_mut().zip(self.0.iter()) {
            *value = clamp_channel((w[0] * r + w[1] * g + w[2] * b) as i32);
        }
        out
    }
}

/// Apply a color matrix to every pixel.
pub fn apply_color_matrix(image: &PixelBuffer, matrix: &ColorMatrix) -> PixelBuffer {
    map_pixels(image, |rgb| matrix.apply(rgb))
}

// ============================================================================
// Kernel
// ============================================================================

/// Where convolution reads neighbors that fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Pixels closer than `size / 2` to the border are copied unconvolved.
    #[default]
    SkipMargin,
    /// Out-of-range neighbors clamp to the nearest valid row/column.
    ReplicateEdge,
}

/// Square convolution kernel with an odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from rows of weights.
    ///
    /// # Errors
    /// `InvalidArgument` if the rows are empty, not square, or of even size.
    pub fn new(rows: &[&[f32]]) -> Result<Self, ImageError> {
        let size = rows.len();
        if size == 0 || size % 2 == 0 {
            return Err(ImageError::invalid(format!(
                "kernel size must be odd and positive, got {}",
                size
            )));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(ImageError::invalid(format!(
                "kernel must be square: expected rows of {} weights, found {}",
                size,
                row.len()
            )));
        }
        Ok(Self {
            size,
            weights: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        })
    }

    /// Normalized 3x3 blur.
    pub fn blur() -> Self {
        const E: f32 = 1.0 / 16.0;
        const S: f32 = 1.0 / 8.0;
        const C: f32 = 1.0 / 4.0;
        Self {
            size: 3,
            weights: vec![E, S, E, S, C, S, E, S, E],
        }
    }

    /// 5x5 sharpen: negative outer ring, positive inner ring, unit center.
    pub fn sharpen() -> Self {
        const O: f32 = -1.0 / 8.0;
        const I: f32 = 1.0 / 4.0;
        #[rustfmt::skip]
        let weights = vec![
            O, O, O, O, O,
            O, I, I, I, O,
            O, I, 1.0, I, O,
            O, I, I, I, O,
            O, O, O, O, O,
        ];
        Self { size: 5, weights }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge of the kernel.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

// ============================================================================
// Convolution
// ============================================================================

/// Convolve the whole image with `kernel` under the given border policy.
///
/// Neighborhoods are always read from `image`, never from partially written
/// output.
pub fn convolve(image: &PixelBuffer, kernel: &Kernel, policy: BorderPolicy) -> PixelBuffer {
    match policy {
        BorderPolicy::SkipMargin => convolve_interior(image, kernel),
        BorderPolicy::ReplicateEdge => {
            let mut output = image.blank_like();
            for y in 0..image.height() {
                for x in 0..image.width() {
                    output.put(x, y, convolve_at(image, kernel, x, y));
                }
            }
            output
        }
    }
}

fn convolve_interior(image: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let mut output = image.clone();
    let radius = kernel.radius() as u32;
    let (width, height) = image.dimensions();

    // Images too small to have an interior come back unchanged
    if width <= 2 * radius || height <= 2 * radius {
        return output;
    }

    for y in radius..height - radius {
        for x in radius..width - radius {
            let mut acc = [0f32; 3];
            for ky in 0..kernel.size() {
                for kx in 0..kernel.size() {
                    let rgb = image.pixel(x + kx as u32 - radius, y + ky as u32 - radius);
                    let w = kernel.weight(kx, ky);
                    acc[0] += rgb[0] as f32 * w;
                    acc[1] += rgb[1] as f32 * w;
                    acc[2] += rgb[2] as f32 * w;
                }
            }
            output.put(x, y, acc.map(clamp_channel_f32));
        }
    }
    output
}

/// Convolve a single pixel, replicating edge pixels for neighbors outside
/// the image.
///
/// The sum is rounded to nearest, not truncated, matching [`convolve`] so a
/// masked filter equals the whole-image filter away from the border.
pub fn convolve_at(image: &PixelBuffer, kernel: &Kernel, x: u32, y: u32) -> Rgb {
    let radius = kernel.radius() as i64;
    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;

    let mut acc = [0f32; 3];
    for ky in 0..kernel.size() {
        let ny = (y as i64 + ky as i64 - radius).clamp(0, max_y) as u32;
        for kx in 0..kernel.size() {
            let nx = (x as i64 + kx as i64 - radius).clamp(0, max_x) as u32;
            let rgb = image.pixel(nx, ny);
            let w = kernel.weight(kx, ky);
            acc[0] += rgb[0] as f32 * w;
            acc[1] += rgb[1] as f32 * w;
            acc[2] += rgb[2] as f32 * w;
        }
    }
    acc.map(clamp_channel_f32)
}
