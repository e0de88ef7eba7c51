//! Histogram computation, peak-based color correction and histogram plots.
//!
//! This module builds per-channel 256-bucket histograms from a
//! [`PixelBuffer`], uses their peaks to align the channels, and renders the
//! three curves into a 256x256 preview image.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::buffer::{Channel, PixelBuffer, Rgb};
use crate::kernel::{clamp_channel, map_pixels};

/// Side length of the rendered histogram canvas.
pub const HISTOGRAM_SIZE: u32 = 256;

/// Histogram data for an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    /// Red channel histogram (256 bins)
    #[serde(with = "bins")]
    pub red: [u32; 256],
    /// Green channel histogram (256 bins)
    #[serde(with = "bins")]
    pub green: [u32; 256],
    /// Blue channel histogram (256 bins)
    #[serde(with = "bins")]
    pub blue: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        }
    }
}

impl Histogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Bins for one channel.
    pub fn channel(&self, channel: Channel) -> &[u32; 256] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Largest bucket count of one channel.
    pub fn channel_max(&self, channel: Channel) -> u32 {
        self.channel(channel).iter().copied().max().unwrap_or(0)
    }

    /// Most frequent value of each channel, as `[red, green, blue]`.
    pub fn peaks(&self) -> [u8; 3] {
        Channel::ALL.map(|c| find_peak_value(self.channel(c)))
    }
}

/// Serde support for 256-element bin arrays, which serde does not derive.
mod bins {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bins: &[u32; 256], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(bins.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u32; 256], D::Error> {
        let values = Vec::<u32>::deserialize(deserializer)?;
        values
            .try_into()
            .map_err(|v: Vec<u32>| D::Error::invalid_length(v.len(), &"256 histogram bins"))
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Count how many pixels take each value, per channel.
///
/// Single pass over the pixels; each channel's bins sum to the pixel count.
pub fn compute_histogram(image: &PixelBuffer) -> Histogram {
    let mut hist = Histogram::new();
    for [r, g, b] in image.pixels() {
        hist.red[r as usize] += 1;
        hist.green[g as usize] += 1;
        hist.blue[b as usize] += 1;
    }
    hist
}

/// Index of the largest bucket. The first maximum wins ties.
pub fn find_peak_value(bins: &[u32; 256]) -> u8 {
    let mut peak = 0usize;
    for (i, &count) in bins.iter().enumerate().skip(1) {
        if count > bins[peak] {
            peak = i;
        }
    }
    peak as u8
}

/// Shift each channel so its histogram peak lands on the mean of the three
/// peaks (truncated), saturating at 0 and 255.
pub fn color_correct(image: &PixelBuffer) -> PixelBuffer {
    let peaks = compute_histogram(image).peaks();
    let target = peaks.iter().map(|&p| p as i32).sum::<i32>() / 3;
    let offsets = peaks.map(|p| target - p as i32);
    debug!(
        "color correct: peaks {:?}, target {}, offsets {:?}",
        peaks, target, offsets
    );

    map_pixels(image, |rgb| {
        [
            clamp_channel(rgb[0] as i32 + offsets[0]),
            clamp_channel(rgb[1] as i32 + offsets[1]),
            clamp_channel(rgb[2] as i32 + offsets[2]),
        ]
    })
}

// ============================================================================
// Rendering
// ============================================================================

/// Color used for each channel's curve.
fn curve_color(channel: Channel) -> Rgb {
    channel.isolate(255)
}

/// Plot the three channel curves on a white 256x256 canvas.
///
/// Bucket `i` sits at `x = i`. Each curve is normalized by its own channel
/// maximum: a bucket with count `c` reaches `floor(c / max * 256)` pixels
/// up from the bottom edge. Consecutive buckets are joined by straight
/// segments; red is drawn first and blue last, so later curves cover
/// earlier ones where they overlap.
pub fn render_histogram(hist: &Histogram) -> PixelBuffer {
    let size = HISTOGRAM_SIZE as i32;
    let mut canvas = PixelBuffer::blank(HISTOGRAM_SIZE, HISTOGRAM_SIZE);
    canvas.as_raw_mut().fill(255);

    for channel in Channel::ALL {
        let max = hist.channel_max(channel);
        if max == 0 {
            trace!("histogram: {:?} channel is empty, skipping curve", channel);
            continue;
        }
        let bins = hist.channel(channel);
        let height = |i: usize| (bins[i] as f64 / max as f64 * size as f64) as i32;
        let color = curve_color(channel);

        for i in 1..bins.len() {
            let from = (i as i32 - 1, size - height(i - 1));
            let to = (i as i32, size - height(i));
            draw_line(&mut canvas, from, to, color);
        }
    }
    canvas
}

/// Compute and render the histogram of `image` in one step.
pub fn histogram_image(image: &PixelBuffer) -> PixelBuffer {
    render_histogram(&compute_histogram(image))
}

/// Bresenham line from `from` to `to` inclusive. Points outside the canvas
/// are skipped.
fn draw_line(canvas: &mut PixelBuffer, from: (i32, i32), to: (i32, i32), color: Rgb) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(canvas, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[inline]
fn plot(canvas: &mut PixelBuffer, x: i32, y: i32, color: Rgb) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn image_from(pixels: &[Rgb]) -> PixelBuffer {
        PixelBuffer::from_raw(
            pixels.len() as u32,
            1,
            pixels.iter().flatten().copied().collect(),
        )
        .unwrap()
    }

    // ===== Histogram struct =====

    #[test]
    fn test_channel_max_is_per_channel() {
        let mut hist = Histogram::new();
        assert_eq!(hist.channel_max(Channel::Red), 0);

        hist.red[255] = 100;
        hist.blue[0] = 50;
        assert_eq!(hist.channel_max(Channel::Red), 100);
        assert_eq!(hist.channel_max(Channel::Green), 0);
        assert_eq!(hist.channel_max(Channel::Blue), 50);
    }

    #[test]
    fn test_histogram_serde_round_trip() {
        let mut hist = Histogram::new();
        hist.green[42] = 7;
        let json = serde_json::to_string(&hist).unwrap();
        let back: Histogram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hist);
    }

    #[test]
    fn test_histogram_deserialize_wrong_bin_count() {
        let json = r#"{"red":[1,2,3],"green":[],"blue":[]}"#;
        assert!(serde_json::from_str::<Histogram>(json).is_err());
    }

    // ===== compute_histogram =====

    #[test]
    fn test_single_red_pixel() {
        let hist = compute_histogram(&image_from(&[[255, 0, 0]]));
        assert_eq!(hist.red[255], 1);
        assert_eq!(hist.green[0], 1);
        assert_eq!(hist.blue[0], 1);
    }

    #[test]
    fn test_rgb_primary_colors() {
        let hist = compute_histogram(&image_from(&[[255, 0, 0], [0, 255, 0], [0, 0, 255]]));
        assert_eq!(hist.red[255], 1);
        assert_eq!(hist.red[0], 2);
        assert_eq!(hist.green[255], 1);
        assert_eq!(hist.green[0], 2);
        assert_eq!(hist.blue[255], 1);
        assert_eq!(hist.blue[0], 2);
    }

    #[test]
    fn test_channel_accessors() {
        let hist = compute_histogram(&image_from(&[[1, 2, 3], [1, 5, 6]]));
        assert_eq!(hist.channel(Channel::Red)[1], 2);
        assert_eq!(hist.channel_max(Channel::Red), 2);
        assert_eq!(hist.channel_max(Channel::Green), 1);
    }

    // ===== find_peak_value =====

    #[test]
    fn test_peak_first_maximum_wins() {
        let mut bins = [0u32; 256];
        bins[30] = 5;
        bins[200] = 5;
        assert_eq!(find_peak_value(&bins), 30);

        bins[201] = 6;
        assert_eq!(find_peak_value(&bins), 201);
    }

    #[test]
    fn test_peak_of_empty_is_zero() {
        assert_eq!(find_peak_value(&[0; 256]), 0);
    }

    // ===== color_correct =====

    #[test_log::test]
    fn test_color_correct_aligns_peaks() {
        // Peaks: red 100, green 50, blue 30 -> target 60
        let img = image_from(&[[100, 50, 30], [100, 50, 30], [120, 90, 10]]);
        let out = color_correct(&img);
        assert_eq!(out.get_pixel(0, 0).unwrap(), [60, 60, 60]);
        // Offsets -40, +10, +30
        assert_eq!(out.get_pixel(2, 0).unwrap(), [80, 100, 40]);
    }

    #[test_log::test]
    fn test_color_correct_clamps() {
        // Peaks: red 250, green 0, blue 5 -> target 85
        let img = image_from(&[[250, 0, 5], [250, 0, 5], [10, 250, 255]]);
        let out = color_correct(&img);
        assert_eq!(out.get_pixel(2, 0).unwrap(), [0, 255, 255]);
    }

    #[test_log::test]
    fn test_color_correct_neutral_gray_unchanged() {
        let img = PixelBuffer::filled(3, 3, [90, 90, 90]).unwrap();
        assert_eq!(color_correct(&img), img);
    }

    // ===== Rendering =====

    #[test]
    fn test_render_dimensions_and_background() {
        let out = histogram_image(&PixelBuffer::filled(4, 4, [10, 20, 30]).unwrap());
        assert_eq!(out.dimensions(), (256, 256));
        assert_eq!(out.get_pixel(200, 100).unwrap(), [255, 255, 255]);
    }

    #[test]
    fn test_render_peaks_reach_top() {
        let out = histogram_image(&PixelBuffer::filled(4, 4, [10, 20, 30]).unwrap());
        assert_eq!(out.get_pixel(10, 0).unwrap(), [255, 0, 0]);
        assert_eq!(out.get_pixel(20, 0).unwrap(), [0, 255, 0]);
        assert_eq!(out.get_pixel(30, 0).unwrap(), [0, 0, 255]);
    }

    #[test]
    fn test_render_independent_normalization() {
        // Red: bucket 10 holds 1 of 4 pixels, bucket 11 holds 3.
        // Green is uniform, so its single bucket reaches the top too.
        let img = image_from(&[[10, 50, 0], [11, 50, 0], [11, 50, 0], [11, 50, 0]]);
        let hist = compute_histogram(&img);
        let out = render_histogram(&hist);

        // Red bucket 11 is the red maximum: drawn at y = 0
        assert_eq!(out.get_pixel(11, 0).unwrap(), [255, 0, 0]);
        // Red bucket 10: floor(1/3 * 256) = 85 -> y = 171
        assert_eq!(out.get_pixel(10, 171).unwrap(), [255, 0, 0]);
        // Green maximum also reaches the top despite different counts
        assert_eq!(out.get_pixel(50, 0).unwrap(), [0, 255, 0]);
    }

    #[test]
    fn test_render_blue_drawn_last() {
        // All three channels share bucket 77, so blue covers the others
        let out = histogram_image(&PixelBuffer::filled(2, 2, [77, 77, 77]).unwrap());
        assert_eq!(out.get_pixel(77, 0).unwrap(), [0, 0, 255]);
    }

    #[test_log::test]
    fn test_render_empty_histogram_is_white() {
        let out = render_histogram(&Histogram::new());
        assert!(out.pixels().all(|p| p == [255, 255, 255]));
    }

    #[test]
    fn test_draw_line_clips() {
        let mut canvas = PixelBuffer::new(4, 4).unwrap();
        draw_line(&mut canvas, (-3, 1), (10, 1), [9, 9, 9]);
        for x in 0..4 {
            assert_eq!(canvas.get_pixel(x, 1).unwrap(), [9, 9, 9]);
        }
        assert_eq!(canvas.get_pixel(0, 0).unwrap(), [0, 0, 0]);
    }

    // ===== Property Tests =====

    fn image_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |pixels| PixelBuffer::from_raw(w, h, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: Each channel's bins sum to the pixel count.
        #[test]
        fn prop_bins_sum_to_pixel_count(img in image_strategy()) {
            let hist = compute_histogram(&img);
            for c in Channel::ALL {
                let total: u64 = hist.channel(c).iter().map(|&v| v as u64).sum();
                prop_assert_eq!(total, img.pixel_count() as u64);
            }
        }

        /// Property: The peak bucket is never smaller than any other bucket.
        #[test]
        fn prop_peak_is_maximum(bins in proptest::array::uniform32(0u32..50)) {
            let mut full = [0u32; 256];
            full[..32].copy_from_slice(&bins);
            let peak = find_peak_value(&full) as usize;
            prop_assert!(full.iter().all(|&v| v <= full[peak]));
        }

        /// Property: Without clamping, a second correction changes nothing.
        #[test]
        fn prop_color_correct_idempotent_without_clamping(
            img in (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
                proptest::collection::vec(100u8..=155, (w * h * 3) as usize)
                    .prop_map(move |pixels| PixelBuffer::from_raw(w, h, pixels).unwrap())
            })
        ) {
            let once = color_correct(&img);
            let peaks = compute_histogram(&once).peaks();
            prop_assert_eq!(peaks[0], peaks[1]);
            prop_assert_eq!(peaks[1], peaks[2]);
            prop_assert_eq!(color_correct(&once), once);
        }
    }
}
