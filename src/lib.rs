// Library exports so the pipeline can be tested and reused without the CLI
pub mod cli;
pub mod error;
pub mod gif_processing;
pub mod utils;

// Re-export commonly used types
pub use cli::{Args, BoundsPolicy};
pub use error::{GifCropError, Result};
pub use gif_processing::{
    crop::CropBox, decode::FrameDecoder, CropEngine, CropSummary, ProcessingConfig,
};
