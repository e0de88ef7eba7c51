//! The `PixelBuffer` storage type.

use super::channel::{ChannelView, ChannelViewMut};
use super::types::{Channel, ImageError, Rgb};

/// An RGB image held in memory.
///
/// Pixels are stored row-major with 3 bytes per pixel, so the backing
/// vector is always exactly `width * height * 3` bytes long. Width and height
/// are positive and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Byte length of a `width x height` RGB buffer, rejecting empty or
/// unaddressable sizes.
fn buffer_len(width: u32, height: u32) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::invalid(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            ImageError::invalid(format!("image dimensions {}x{} are too large", width, height))
        })
}

impl PixelBuffer {
    /// Create a black image.
    ///
    /// # Errors
    /// `InvalidArgument` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ImageError> {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Create an image with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: Rgb) -> Result<Self, ImageError> {
        let len = buffer_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for _ in 0..len / 3 {
            pixels.extend_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing row-major RGB bytes.
    ///
    /// # Errors
    /// `InvalidArgument` if a dimension is zero or `pixels.len()` is not
    /// `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::invalid(format!(
                "pixel data size mismatch for {}x{}: expected {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Black buffer with the same dimensions as `self`.
    ///
    /// Dimensions of an existing buffer are always valid, so this cannot fail.
    pub(crate) fn blank_like(&self) -> Self {
        Self::blank(self.width, self.height)
    }

    /// Black buffer for dimensions the caller has already validated.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "blank buffer needs positive dimensions");
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 3],
        }
    }

    /// Create a PixelBuffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Convert to an `image::RgbImage` for interop with the `image` crate.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.pixel(x, y))
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw row-major RGB bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub(crate) fn ensure_same_dimensions(
        &self,
        other: &PixelBuffer,
        what: &str,
    ) -> Result<(), ImageError> {
        if self.same_dimensions(other) {
            Ok(())
        } else {
            Err(ImageError::invalid(format!(
                "{} must match the source dimensions: expected {}x{}, got {}x{}",
                what, self.width, self.height, other.width, other.height
            )))
        }
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Errors
    /// `OutOfBounds` if the coordinate lies outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgb, ImageError> {
        self.check_bounds(x, y)?;
        Ok(self.pixel(x, y))
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Errors
    /// `OutOfBounds` if the coordinate lies outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: Rgb) -> Result<(), ImageError> {
        self.check_bounds(x, y)?;
        self.put(x, y, rgb);
        Ok(())
    }

    pub(crate) fn check_bounds(&self, x: u32, y: u32) -> Result<(), ImageError> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Unchecked-by-result read for loops that iterate known-valid coordinates.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = self.offset(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: u32, y: u32, rgb: Rgb) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    pub(crate) fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.pixels.chunks_exact_mut(3)
    }

    /// Read-only 2-D view of one channel.
    pub fn channel(&self, channel: Channel) -> ChannelView<'_> {
        ChannelView::new(self, channel)
    }

    /// Read/write 2-D view of one channel.
    pub fn channel_mut(&mut self, channel: Channel) -> ChannelViewMut<'_> {
        ChannelViewMut::new(self, channel)
    }

    /// Copy one channel out as a row-major plane of `width * height` values.
    pub fn extract_channel(&self, channel: Channel) -> Vec<u8> {
        self.channel(channel).iter().collect()
    }

    /// Overwrite one channel from a row-major plane.
    ///
    /// # Errors
    /// `InvalidArgument` if `plane.len()` is not `width * height`.
    pub fn set_channel(&mut self, channel: Channel, plane: &[u8]) -> Result<(), ImageError> {
        if plane.len() != self.pixel_count() {
            return Err(ImageError::invalid(format!(
                "channel plane for a {}x{} image needs {} values, got {}",
                self.width,
                self.height,
                self.pixel_count(),
                plane.len()
            )));
        }
        let c = channel.index();
        for (chunk, &value) in self.pixels.chunks_exact_mut(3).zip(plane) {
            chunk[c] = value;
        }
        Ok(())
    }
}
