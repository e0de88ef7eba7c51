//! The standard transform library.
//!
//! Every function borrows its input and returns a freshly allocated image.
//! Operations that validate arguments return `Result`; the rest cannot fail.
//!
//! | Group     | Operations                                            |
//! |-----------|-------------------------------------------------------|
//! | color     | grayscale, sepia, brighten, component visualizations  |
//! | geometry  | horizontal/vertical flip, nearest-neighbor downscale  |
//! | filter    | blur, sharpen                                         |
//! | channels  | split into R/G/B images, recombine                    |

mod channels;
mod color;
mod filter;
mod geometry;

pub use channels::{combine_rgb, split_rgb};
pub use color::{
    brighten, grayscale, sepia, visualize_blue, visualize_channel, visualize_green,
    visualize_intensity, visualize_luma, visualize_red, visualize_value,
};
pub use filter::{blur, sharpen};
pub use geometry::{downscale, flip_horizontal, flip_vertical};
