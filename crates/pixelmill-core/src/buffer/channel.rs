//! Two-dimensional views over a single color channel.
//!
//! Per-channel algorithms (wavelet compression, histograms) treat the image
//! as three independent planes. These views expose one plane without copying.

use super::pixels::PixelBuffer;
use super::types::{Channel, ImageError};

/// Read-only view of one channel across the whole image.
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    image: &'a PixelBuffer,
    channel: Channel,
}

impl<'a> ChannelView<'a> {
    pub(crate) fn new(image: &'a PixelBuffer, channel: Channel) -> Self {
        Self { image, channel }
    }

    /// Which channel this view reads.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Value at `(x, y)`.
    ///
    /// # Errors
    /// `OutOfBounds` if the coordinate lies outside the image.
    pub fn get(&self, x: u32, y: u32) -> Result<u8, ImageError> {
        self.image.check_bounds(x, y)?;
        Ok(self.image.as_raw()[self.image.offset(x, y) + self.channel.index()])
    }

    /// Row-major iteration over the channel values.
    pub fn iter(&self) -> impl Iterator<Item = u8> + 'a {
        let c = self.channel.index();
        self.image.as_raw().chunks_exact(3).map(move |p| p[c])
    }
}

/// Read/write view of one channel across the whole image.
#[derive(Debug)]
pub struct ChannelViewMut<'a> {
    image: &'a mut PixelBuffer,
    channel: Channel,
}

impl<'a> ChannelViewMut<'a> {
    pub(crate) fn new(image: &'a mut PixelBuffer, channel: Channel) -> Self {
        Self { image, channel }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Value at `(x, y)`.
    ///
    /// # Errors
    /// `OutOfBounds` if the coordinate lies outside the image.
    pub fn get(&self, x: u32, y: u32) -> Result<u8, ImageError> {
        self.image.channel(self.channel).get(x, y)
    }

    /// Write `value` at `(x, y)`, leaving the other channels alone.
    ///
    /// # Errors
    /// `OutOfBounds` if the coordinate lies outside the image; nothing is
    /// written.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<(), ImageError> {
        self.image.check_bounds(x, y)?;
        let mut rgb = self.image.pixel(x, y);
        rgb[self.channel.index()] = value;
        self.image.put(x, y, rgb);
        Ok(())
    }

    /// Row-major mutable iteration over the channel values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        let c = self.channel.index();
        self.image.pixels_mut().map(move |p| &mut p[c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                img.set_pixel(x, y, [x as u8, y as u8, 100]).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_view_reads_selected_channel() {
        let img = gradient(3, 2);
        let red = img.channel(Channel::Red);
        let green = img.channel(Channel::Green);

        assert_eq!(red.get(2, 1).unwrap(), 2);
        assert_eq!(green.get(2, 1).unwrap(), 1);
        assert_eq!(img.channel(Channel::Blue).get(0, 0).unwrap(), 100);
    }

    #[test]
    fn test_view_get_out_of_bounds() {
        let img = gradient(3, 2);
        let red = img.channel(Channel::Red);
        assert_eq!(
            red.get(3, 0),
            Err(ImageError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
        assert!(matches!(
            img.get_pixel(3, 0),
            Err(ImageError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_view_iter_row_major() {
        let img = gradient(3, 2);
        let values: Vec<u8> = img.channel(Channel::Red).iter().collect();
        assert_eq!(values, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_view_mut_set_only_touches_channel() {
        let mut img = gradient(3, 2);
        {
            let mut green = img.channel_mut(Channel::Green);
            green.set(1, 1, 77).unwrap();
            assert_eq!(green.get(1, 1).unwrap(), 77);
        }
        assert_eq!(img.get_pixel(1, 1).unwrap(), [1, 77, 100]);
    }

    #[test]
    fn test_view_mut_set_out_of_bounds() {
        let mut img = gradient(2, 2);
        let before = img.clone();
        let result = img.channel_mut(Channel::Green).set(5, 5, 77);
        assert_eq!(
            result,
            Err(ImageError::OutOfBounds {
                x: 5,
                y: 5,
                width: 2,
                height: 2
            })
        );
        assert_eq!(result, img.set_pixel(5, 5, [0, 77, 0]));
        assert_eq!(img, before);
    }

    #[test]
    fn test_view_mut_iter() {
        let mut img = gradient(2, 2);
        for v in img.channel_mut(Channel::Blue).iter_mut() {
            *v = 0;
        }
        assert!(img.pixels().all(|p| p[2] == 0));
        assert_eq!(img.get_pixel(1, 1).unwrap(), [1, 1, 0]);
    }
}
