//! Lossy compression with a 2-D Haar wavelet transform.
//!
//! Each channel is handled independently:
//!
//! 1. Pad the `H x W` plane with zeros to `N x N`, where `N` is the next
//!    power of two of `max(H, W)`
//! 2. Forward transform: for `m = N, N/2, ..., 2`, transform every row and
//!    then every column of the top-left `m x m` block
//! 3. Zero the smallest coefficients until the requested share of total
//!    magnitude has been discarded
//! 4. Inverse transform in the reverse order (columns then rows, `m = 2..N`)
//! 5. Crop back to `H x W`, round to nearest and clamp to [0, 255]
//!
//! `percentage` is the share of coefficient energy (sum of magnitudes)
//! thrown away: 0 keeps everything, 100 discards every coefficient.

use log::{debug, trace};

use crate::buffer::{Channel, ChannelView, ChannelViewMut, ImageError, PixelBuffer};

// ============================================================================
// Plane
// ============================================================================

/// Square `size x size` grid of wavelet coefficients, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletPlane {
    size: usize,
    coeffs: Vec<f64>,
}

impl WaveletPlane {
    /// Zero-pad a row-major `width x height` plane of channel values to the
    /// next power-of-two square.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `values.len()` is not `width * height` or a
    /// dimension is zero.
    pub fn pad(values: &[u8], width: usize, height: usize) -> Result<Self, ImageError> {
        if width == 0 || height == 0 || values.len() != width * height {
            return Err(ImageError::invalid(format!(
                "plane of {} values does not match {}x{}",
                values.len(),
                width,
                height
            )));
        }
        let size = width.max(height).next_power_of_two();
        let mut coeffs = vec![0.0; size * size];
        for (y, row) in values.chunks_exact(width).enumerate() {
            for (x, &v) in row.iter().enumerate() {
                coeffs[y * size + x] = v as f64;
            }
        }
        Ok(Self { size, coeffs })
    }

    /// Zero-pad one image channel, read in place through its view.
    pub fn from_channel(view: ChannelView<'_>) -> Self {
        let width = view.width() as usize;
        let size = width.max(view.height() as usize).next_power_of_two();
        let mut coeffs = vec![0.0; size * size];
        for (i, v) in view.iter().enumerate() {
            coeffs[(i / width) * size + i % width] = v as f64;
        }
        Self { size, coeffs }
    }

    /// Write the top-left region back into an image channel.
    pub fn write_channel(&self, view: &mut ChannelViewMut<'_>) {
        let width = view.width() as usize;
        for (i, value) in view.iter_mut().enumerate() {
            *value = to_channel(self.get(i % width, i / width));
        }
    }

    /// Side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All coefficients, row-major.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficient at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.coeffs[y * self.size + x]
    }

    /// Top-left `width x height` region, rounded and clamped to channel values.
    pub fn unpad(&self, width: usize, height: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(width * height);
        for y in 0..height.min(self.size) {
            for x in 0..width.min(self.size) {
                out.push(to_channel(self.get(x, y)));
            }
        }
        out
    }

    fn column(&self, x: usize, len: usize) -> Vec<f64> {
        (0..len).map(|y| self.coeffs[y * self.size + x]).collect()
    }

    fn set_column(&mut self, x: usize, values: &[f64]) {
        for (y, &v) in values.iter().enumerate() {
            self.coeffs[y * self.size + x] = v;
        }
    }

    fn row_mut(&mut self, y: usize, len: usize) -> &mut [f64] {
        let start = y * self.size;
        &mut self.coeffs[start..start + len]
    }
}

/// Round to nearest and clamp to [0, 255].
fn to_channel(coeff: f64) -> u8 {
    coeff.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Haar Transform
// ============================================================================

/// One Haar averaging/differencing pass over `values`, whose length is even.
///
/// Pair `(a, b)` becomes `(a + b) / sqrt(2)` in the first half and
/// `(a - b) / sqrt(2)` in the second.
fn haar_step(values: &mut [f64]) {
    let half = values.len() / 2;
    let mut scratch = vec![0.0; values.len()];
    for i in 0..half {
        let (a, b) = (values[2 * i], values[2 * i + 1]);
        scratch[i] = (a + b) / std::f64::consts::SQRT_2;
        scratch[i + half] = (a - b) / std::f64::consts::SQRT_2;
    }
    values.copy_from_slice(&scratch);
}

/// Exact inverse of [`haar_step`].
fn haar_unstep(values: &mut [f64]) {
    let half = values.len() / 2;
    let mut scratch = vec![0.0; values.len()];
    for i in 0..half {
        let (avg, diff) = (values[i], values[i + half]);
        scratch[2 * i] = (avg + diff) / std::f64::consts::SQRT_2;
        scratch[2 * i + 1] = (avg - diff) / std::f64::consts::SQRT_2;
    }
    values.copy_from_slice(&scratch);
}

/// Full forward 2-D transform, in place.
pub fn haar_forward(plane: &mut WaveletPlane) {
    let mut m = plane.size;
    while m > 1 {
        for y in 0..m {
            haar_step(plane.row_mut(y, m));
        }
        for x in 0..m {
            let mut col = plane.column(x, m);
            haar_step(&mut col);
            plane.set_column(x, &col);
        }
        m /= 2;
    }
}

/// Full inverse 2-D transform, in place.
pub fn haar_inverse(plane: &mut WaveletPlane) {
    let mut m = 2;
    while m <= plane.size {
        for x in 0..m {
            let mut col = plane.column(x, m);
            haar_unstep(&mut col);
            plane.set_column(x, &col);
        }
        for y in 0..m {
            haar_unstep(plane.row_mut(y, m));
        }
        m *= 2;
    }
}

// ============================================================================
// Thresholding
// ============================================================================

/// Zero the smallest coefficients until `percentage` percent of the total
/// magnitude has been reached. Returns how many coefficients were zeroed.
///
/// Magnitudes are sorted ascending; the threshold is the first magnitude at
/// which the running sum reaches `total * percentage / 100`, and every
/// coefficient with `|c| <= threshold` is zeroed.
///
/// A percentage of zero or less returns before thresholding and leaves the
/// plane untouched. Running the threshold rule at 0% would pick the
/// smallest magnitude and still zero every coefficient equal to it; on a
/// 1x1 plane that is the only coefficient, so 0% would turn the pixel black.
pub fn discard_energy(plane: &mut WaveletPlane, percentage: f64) -> usize {
    if percentage <= 0.0 {
        return 0;
    }

    let mut magnitudes: Vec<f64> = plane.coeffs.iter().map(|c| c.abs()).collect();
    magnitudes.sort_by(f64::total_cmp);

    // Summing in sorted order makes 100% land exactly on the last magnitude
    let total: f64 = magnitudes.iter().sum();
    let target = total * (percentage / 100.0);

    let mut running = 0.0;
    let mut threshold = 0.0;
    for &m in &magnitudes {
        running += m;
        if running >= target {
            threshold = m;
            break;
        }
    }

    let mut zeroed = 0;
    for c in plane.coeffs.iter_mut() {
        if c.abs() <= threshold {
            *c = 0.0;
            zeroed += 1;
        }
    }
    trace!(
        "discard energy: total {:.3}, threshold {:.3}, zeroed {} of {}",
        total,
        threshold,
        zeroed,
        plane.coeffs.len()
    );
    zeroed
}

/// Compress one row-major `width x height` channel plane.
///
/// # Errors
///
/// `InvalidArgument` if `values.len()` is not `width * height`.
pub fn compress_plane(
    values: &[u8],
    width: usize,
    height: usize,
    percentage: f64,
) -> Result<Vec<u8>, ImageError> {
    let mut plane = WaveletPlane::pad(values, width, height)?;
    reconstruct(&mut plane, percentage);
    Ok(plane.unpad(width, height))
}

/// Forward transform, threshold, inverse transform.
fn reconstruct(plane: &mut WaveletPlane, percentage: f64) {
    haar_forward(plane);
    discard_energy(plane, percentage);
    haar_inverse(plane);
}

/// Compress every channel of `image` independently.
///
/// # Errors
///
/// `InvalidArgument` if `percentage` is outside `0..=100`.
pub fn compress(image: &PixelBuffer, percentage: i32) -> Result<PixelBuffer, ImageError> {
    if !(0..=100).contains(&percentage) {
        return Err(ImageError::invalid(format!(
            "compression percentage must be between 0 and 100, got {}",
            percentage
        )));
    }

    let (width, height) = (image.width() as usize, image.height() as usize);
    debug!(
        "compress {}x{} at {}% (padded to {})",
        width,
        height,
        percentage,
        width.max(height).next_power_of_two()
    );

    let mut output = image.clone();
    for channel in Channel::ALL {
        let mut plane = WaveletPlane::from_channel(image.channel(channel));
        reconstruct(&mut plane, percentage as f64);
        plane.write_channel(&mut output.channel_mut(channel));
    }
    Ok(output)
}
