//! Error types for the crop pipeline.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, GifCropError>;

/// Everything that can go wrong between reading the input GIF and
/// writing the cropped output.
#[derive(Debug, thiserror::Error)]
pub enum GifCropError {
    /// The input path does not exist or is not a regular file.
    /// Checked before any decode attempt.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The crop rectangle fails the ordering or non-negativity checks.
    #[error("invalid crop dimensions: {0}")]
    InvalidDimensions(String),

    /// The crop rectangle is not contained in the frame extent.
    #[error(
        "crop box ({left}, {top}, {right}, {bottom}) exceeds the {width}x{height} frame bounds"
    )]
    CropOutOfBounds {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        width: u32,
        height: u32,
    },

    /// The decoder produced zero frames (empty or malformed animation).
    #[error("no frames were extracted from the input GIF")]
    EmptySequence,

    /// GIF decoding failed (corrupt file, unsupported variant).
    #[error("GIF decode failed: {0}")]
    Decode(#[from] gif::DecodingError),

    /// GIF encoding failed.
    #[error("GIF encode failed: {0}")]
    Encode(#[from] gif::EncodingError),

    /// File I/O failure outside the codec itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
