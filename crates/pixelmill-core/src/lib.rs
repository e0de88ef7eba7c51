//! Pixelmill Core - Raster image transformation engine
//!
//! This crate provides the image processing functionality for Pixelmill:
//! per-pixel color transforms, convolution filters, histogram-based color
//! correction, levels adjustment, wavelet compression, and compositing
//! (split-view previews and mask-gated edits) over an in-memory RGB buffer.
//!
//! Every operation borrows its input and returns a new [`PixelBuffer`].
//! Operations that validate parameters return `Result<_, ImageError>`.

pub mod buffer;
pub mod composite;
pub mod compress;
pub mod histogram;
pub mod kernel;
pub mod levels;
pub mod luminance;
pub mod mask;
pub mod operation;
pub mod transform;

pub use buffer::{Channel, ChannelView, ChannelViewMut, ImageError, PixelBuffer, Rgb};
pub use composite::apply_split_view;
pub use compress::compress;
pub use histogram::{
    color_correct, compute_histogram, find_peak_value, histogram_image, render_histogram,
    Histogram,
};
pub use kernel::{BorderPolicy, ColorMatrix, Kernel};
pub use levels::{levels_adjust, LevelsLut};
pub use mask::{apply_with_mask, MaskOperation};
pub use operation::Operation;
