//! Mask-gated transforms for region-based editing
//!
//! A mask is an image of the same size as the source. Pixels where the mask
//! is near-black (every channel below [`MASK_THRESHOLD`]) are selected and
//! receive the transform; everything else is copied through untouched.
//!
//! ## Operations
//!
//! Only transforms that can be evaluated one pixel at a time are available
//! here, listed in [`MaskOperation`]. Kernel filters read their neighborhood
//! with edge replication, so selected pixels on the image border still get
//! a filtered value.

mod apply;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{Channel, ImageError, PixelBuffer, Rgb};
use crate::kernel::{convolve_at, ColorMatrix, Kernel};

pub use apply::apply_with_mask;

/// Mask pixels with every channel strictly below this value are selected.
pub const MASK_THRESHOLD: u8 = 10;

/// Whether a mask pixel selects its position for transformation.
#[inline]
pub fn is_selected(mask_pixel: Rgb) -> bool {
    mask_pixel.iter().all(|&v| v < MASK_THRESHOLD)
}

/// A transform that can be computed for a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskOperation {
    Grayscale,
    Sepia,
    RedComponent,
    GreenComponent,
    BlueComponent,
    Blur,
    Sharpen,
}

impl MaskOperation {
    pub const ALL: [MaskOperation; 7] = [
        MaskOperation::Grayscale,
        MaskOperation::Sepia,
        MaskOperation::RedComponent,
        MaskOperation::GreenComponent,
        MaskOperation::BlueComponent,
        MaskOperation::Blur,
        MaskOperation::Sharpen,
    ];

    /// Command name, e.g. `"red-component"`.
    pub fn name(self) -> &'static str {
        match self {
            MaskOperation::Grayscale => "grayscale",
            MaskOperation::Sepia => "sepia",
            MaskOperation::RedComponent => "red-component",
            MaskOperation::GreenComponent => "green-component",
            MaskOperation::BlueComponent => "blue-component",
            MaskOperation::Blur => "blur",
            MaskOperation::Sharpen => "sharpen",
        }
    }

    /// Kernel used by the filter variants.
    pub fn kernel(self) -> Option<Kernel> {
        match self {
            MaskOperation::Blur => Some(Kernel::blur()),
            MaskOperation::Sharpen => Some(Kernel::sharpen()),
            _ => None,
        }
    }

    /// Output pixel at `(x, y)` as if the transform were applied there.
    ///
    /// The coordinate must lie inside `image`.
    pub fn apply_at(self, image: &PixelBuffer, x: u32, y: u32) -> Rgb {
        self.evaluate(self.kernel().as_ref(), image, x, y)
    }

    /// [`apply_at`](Self::apply_at) with the kernel already looked up, so
    /// whole-image loops build it once. `kernel` must be `self.kernel()`.
    pub(crate) fn evaluate(
        self,
        kernel: Option<&Kernel>,
        image: &PixelBuffer,
        x: u32,
        y: u32,
    ) -> Rgb {
        match kernel {
            Some(kernel) => convolve_at(image, kernel, x, y),
            None => self.apply_pixel(image.pixel(x, y)),
        }
    }

    /// Color transform of a lone pixel. Filters need a neighborhood, so
    /// they pass the pixel through here.
    fn apply_pixel(self, rgb: Rgb) -> Rgb {
        match self {
            MaskOperation::Grayscale => ColorMatrix::GRAYSCALE.apply(rgb),
            MaskOperation::Sepia => ColorMatrix::SEPIA.apply(rgb),
            MaskOperation::RedComponent => isolate(rgb, Channel::Red),
            MaskOperation::GreenComponent => isolate(rgb, Channel::Green),
            MaskOperation::BlueComponent => isolate(rgb, Channel::Blue),
            MaskOperation::Blur | MaskOperation::Sharpen => rgb,
        }
    }
}

fn isolate(rgb: Rgb, channel: Channel) -> Rgb {
    channel.isolate(rgb[channel.index()])
}

impl fmt::Display for MaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaskOperation {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaskOperation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ImageError::invalid(format!("unknown mask operation '{}'", s)))
    }
}
