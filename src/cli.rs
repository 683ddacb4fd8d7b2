use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::gif_processing::crop::CropBox;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Fail when the crop box exceeds the frame bounds
    #[value(name = "reject")]
    Reject,
    /// Trim the crop box to the frame bounds
    #[value(name = "clamp")]
    Clamp,
}

#[derive(Parser, Debug)]
#[command(
    name = "gifcrop",
    about = "Crop animated GIF files while preserving animation",
    long_about = "
gifcrop - Animated GIF cropping tool

Applies one rectangular crop to every frame of an animated GIF and re-encodes
the result. Frame timing and the loop count of the source animation are carried
over to the output file.

The crop box is a half-open rectangle: pixels with left <= x < right and
top <= y < bottom are kept, so the output frames are (right-left) x (bottom-top)
pixels.

Example Usage:
  # Crop a 10px border off a 100x100 animation
  gifcrop input.gif output.gif --left 10 --top 10 --right 90 --bottom 90

  # Keep the top-left quadrant
  gifcrop input.gif output.gif --left 0 --top 0 --right 50 --bottom 50

  # Trim an oversized box to the frame instead of failing
  gifcrop input.gif output.gif --left 20 --top 20 --right 500 --bottom 500 \\
    --bounds clamp

  # Show per-stage details while processing
  gifcrop input.gif output.gif --left 2 --top 2 --right 8 --bottom 8 --verbose"
)]
pub struct Args {
    /// Input GIF file path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output GIF file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Left coordinate of the crop box (inclusive)
    #[arg(long = "left", value_name = "N", allow_negative_numbers = true)]
    pub left: i64,

    /// Top coordinate of the crop box (inclusive)
    #[arg(long = "top", value_name = "N", allow_negative_numbers = true)]
    pub top: i64,

    /// Right coordinate of the crop box (exclusive)
    #[arg(long = "right", value_name = "N", allow_negative_numbers = true)]
    pub right: i64,

    /// Bottom coordinate of the crop box (exclusive)
    #[arg(long = "bottom", value_name = "N", allow_negative_numbers = true)]
    pub bottom: i64,

    /// What to do when the crop box exceeds the frame bounds
    #[arg(long = "bounds", default_value = "reject", value_name = "POLICY")]
    pub bounds_policy: BoundsPolicy,

    /// Enable verbose output with detailed progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// The crop rectangle as given on the command line, unvalidated.
    pub fn crop_box(&self) -> CropBox {
        CropBox {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
        }
    }
}

// Fixture constructor for tests in other modules
#[cfg(test)]
impl Args {
    pub fn for_tests(input: &str) -> Self {
        Self {
            input: PathBuf::from(input),
            output: PathBuf::from("out.gif"),
            left: 0,
            top: 0,
            right: 5,
            bottom: 5,
            bounds_policy: BoundsPolicy::Reject,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let args = Args::try_parse_from([
            "gifcrop", "in.gif", "out.gif", "--left", "2", "--top", "2", "--right", "8",
            "--bottom", "8",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("in.gif"));
        assert_eq!(args.output, PathBuf::from("out.gif"));
        assert_eq!(
            args.crop_box(),
            CropBox {
                left: 2,
                top: 2,
                right: 8,
                bottom: 8
            }
        );
        assert_eq!(args.bounds_policy, BoundsPolicy::Reject);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_negative_coordinates() {
        // Negative values must reach the validator instead of being
        // rejected by the argument parser.
        let args = Args::try_parse_from([
            "gifcrop", "in.gif", "out.gif", "--left", "-1", "--top", "0", "--right", "5",
            "--bottom", "5",
        ])
        .unwrap();

        assert_eq!(args.left, -1);
    }

    #[test]
    fn test_parse_missing_coordinate() {
        let result = Args::try_parse_from([
            "gifcrop", "in.gif", "out.gif", "--left", "0", "--top", "0", "--right", "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bounds_policy() {
        let args = Args::try_parse_from([
            "gifcrop", "in.gif", "out.gif", "--left", "0", "--top", "0", "--right", "5",
            "--bottom", "5", "--bounds", "clamp",
        ])
        .unwrap();
        assert_eq!(args.bounds_policy, BoundsPolicy::Clamp);

        let result = Args::try_parse_from([
            "gifcrop", "in.gif", "out.gif", "--left", "0", "--top", "0", "--right", "5",
            "--bottom", "5", "--bounds", "wrap",
        ]);
        assert!(result.is_err());
    }
}
