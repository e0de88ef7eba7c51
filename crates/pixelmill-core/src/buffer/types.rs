//! Core types shared by the pixel buffer and every transform.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One pixel as an ordered (R, G, B) triple.
pub type Rgb = [u8; 3];

/// Error types for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// A parameter is out of range, misordered, or inconsistent with the
    /// images it applies to.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A pixel coordinate lies outside the image.
    #[error("Pixel ({x}, {y}) is out of bounds for a {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl ImageError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ImageError::InvalidArgument(message.into())
    }
}

/// One color component of an RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel within a pixel.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// A pixel that only carries `value` in this channel.
    #[inline]
    pub fn isolate(self, value: u8) -> Rgb {
        let mut rgb = [0u8; 3];
        rgb[self.index()] = value;
        rgb
    }
}

impl TryFrom<usize> for Channel {
    type Error = ImageError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Red),
            1 => Ok(Channel::Green),
            2 => Ok(Channel::Blue),
            _ => Err(ImageError::invalid(format!(
                "channel index {} is not one of 0 (red), 1 (green), 2 (blue)",
                value
            ))),
        }
    }
}
