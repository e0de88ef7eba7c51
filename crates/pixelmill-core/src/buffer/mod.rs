//! In-memory RGB pixel buffer.
//!
//! This module provides the storage type every engine operation works on:
//! - `PixelBuffer`, a row-major, 3-bytes-per-pixel image with fixed dimensions
//! - `ChannelView` / `ChannelViewMut`, 2-D views over one color component
//! - `ImageError`, the error type shared by the whole engine
//!
//! # Ownership
//!
//! A buffer exclusively owns its pixels and `Clone` produces a fully
//! independent deep copy. Engine operations borrow their inputs and always
//! return a newly allocated buffer, so the caller's image is never mutated.
//!
//! # Examples
//!
//! ```ignore
//! use pixelmill_core::buffer::PixelBuffer;
//!
//! let mut image = PixelBuffer::new(4, 3)?;
//! image.set_pixel(1, 2, [255, 0, 0])?;
//! assert_eq!(image.get_pixel(1, 2)?, [255, 0, 0]);
//! ```

mod channel;
mod pixels;
mod types;

pub use pixels::PixelBuffer;
pub use channel::{ChannelView, ChannelViewMut};
pub use types::{Channel, ImageError, Rgb};
