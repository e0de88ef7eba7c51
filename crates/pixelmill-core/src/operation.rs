//! Whole-image operations as data.
//!
//! [`Operation`] names every transform the engine can run over a full
//! image, together with its parameters. Front ends build one from a command
//! name and integer operands with [`Operation::parse`], or deserialize it
//! from JSON:
//!
//! ```json
//! { "op": "levels-adjust", "black": 20, "mid": 100, "white": 230 }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::{ImageError, PixelBuffer};
use crate::mask::MaskOperation;
use crate::{compress, histogram, levels, transform};

/// A whole-image transform and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    Grayscale,
    Sepia,
    Brighten {
        increment: i32,
    },
    #[serde(rename = "horizontal-flip")]
    FlipHorizontal,
    #[serde(rename = "vertical-flip")]
    FlipVertical,
    Blur,
    Sharpen,
    RedComponent,
    GreenComponent,
    BlueComponent,
    ValueComponent,
    IntensityComponent,
    LumaComponent,
    ColorCorrect,
    LevelsAdjust {
        black: i32,
        mid: i32,
        white: i32,
    },
    Compress {
        percentage: i32,
    },
}

impl Operation {
    /// Command name, e.g. `"horizontal-flip"`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Sepia => "sepia",
            Operation::Brighten { .. } => "brighten",
            Operation::FlipHorizontal => "horizontal-flip",
            Operation::FlipVertical => "vertical-flip",
            Operation::Blur => "blur",
            Operation::Sharpen => "sharpen",
            Operation::RedComponent => "red-component",
            Operation::GreenComponent => "green-component",
            Operation::BlueComponent => "blue-component",
            Operation::ValueComponent => "value-component",
            Operation::IntensityComponent => "intensity-component",
            Operation::LumaComponent => "luma-component",
            Operation::ColorCorrect => "color-correct",
            Operation::LevelsAdjust { .. } => "levels-adjust",
            Operation::Compress { .. } => "compress",
        }
    }

    /// Build an operation from a command name and its integer operands.
    ///
    /// # Arguments
    ///
    /// * `name` - Command name, e.g. `"brighten"` or `"levels-adjust"`
    /// * `args` - Operands in command order: `brighten <increment>`,
    ///   `levels-adjust <black> <mid> <white>`, `compress <percentage>`;
    ///   every other operation takes none
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an unknown name or the wrong number of operands.
    /// Operand values are checked later, when the operation runs.
    pub fn parse(name: &str, args: &[i32]) -> Result<Self, ImageError> {
        let op = match (name, args) {
            ("grayscale", []) => Operation::Grayscale,
            ("sepia", []) => Operation::Sepia,
            ("brighten", &[increment]) => Operation::Brighten { increment },
            ("horizontal-flip", []) => Operation::FlipHorizontal,
            ("vertical-flip", []) => Operation::FlipVertical,
            ("blur", []) => Operation::Blur,
            ("sharpen", []) => Operation::Sharpen,
            ("red-component", []) => Operation::RedComponent,
            ("green-component", []) => Operation::GreenComponent,
            ("blue-component", []) => Operation::BlueComponent,
            ("value-component", []) => Operation::ValueComponent,
            ("intensity-component", []) => Operation::IntensityComponent,
            ("luma-component", []) => Operation::LumaComponent,
            ("color-correct", []) => Operation::ColorCorrect,
            ("levels-adjust", &[black, mid, white]) => Operation::LevelsAdjust { black, mid, white },
            ("compress", &[percentage]) => Operation::Compress { percentage },
            (
                "grayscale" | "sepia" | "brighten" | "horizontal-flip" | "vertical-flip" | "blur"
                | "sharpen" | "red-component" | "green-component" | "blue-component"
                | "value-component" | "intensity-component" | "luma-component"
                | "color-correct" | "levels-adjust" | "compress",
                _,
            ) => {
                return Err(ImageError::invalid(format!(
                    "wrong number of operands for '{}': got {}",
                    name,
                    args.len()
                )))
            }
            _ => return Err(ImageError::invalid(format!("unknown operation '{}'", name))),
        };
        Ok(op)
    }

    /// Run the operation over the whole image, returning a new image of the
    /// same dimensions.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the parameters are out of range (levels
    /// ordering, compression percentage).
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageError> {
        let output = match *self {
            Operation::Grayscale => transform::grayscale(image),
            Operation::Sepia => transform::sepia(image),
            Operation::Brighten { increment } => transform::brighten(image, increment),
            Operation::FlipHorizontal => transform::flip_horizontal(image),
            Operation::FlipVertical => transform::flip_vertical(image),
            Operation::Blur => transform::blur(image),
            Operation::Sharpen => transform::sharpen(image),
            Operation::RedComponent => transform::visualize_red(image),
            Operation::GreenComponent => transform::visualize_green(image),
            Operation::BlueComponent => transform::visualize_blue(image),
            Operation::ValueComponent => transform::visualize_value(image),
            Operation::IntensityComponent => transform::visualize_intensity(image),
            Operation::LumaComponent => transform::visualize_luma(image),
            Operation::ColorCorrect => histogram::color_correct(image),
            Operation::LevelsAdjust { black, mid, white } => {
                levels::levels_adjust(image, black, mid, white)?
            }
            Operation::Compress { percentage } => compress::compress(image, percentage)?,
        };
        Ok(output)
    }
}

impl From<MaskOperation> for Operation {
    fn from(op: MaskOperation) -> Self {
        match op {
            MaskOperation::Grayscale => Operation::Grayscale,
            MaskOperation::Sepia => Operation::Sepia,
            MaskOperation::RedComponent => Operation::RedComponent,
            MaskOperation::GreenComponent => Operation::GreenComponent,
            MaskOperation::BlueComponent => Operation::BlueComponent,
            MaskOperation::Blur => Operation::Blur,
            MaskOperation::Sharpen => Operation::Sharpen,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Brighten { increment } => write!(f, "brighten {}", increment),
            Operation::LevelsAdjust { black, mid, white } => {
                write!(f, "levels-adjust {} {} {}", black, mid, white)
            }
            Operation::Compress { percentage } => write!(f, "compress {}", percentage),
            other => f.write_str(other.name()),
        }
    }
}
