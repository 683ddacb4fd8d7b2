pub mod crop;
pub mod decode;
pub mod encode;

use gif::Repeat;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::cli::BoundsPolicy;
use crate::error::{GifCropError, Result};
use crate::utils::verbose_println;
use crop::CropBox;
use decode::FrameDecoder;

#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub crop: CropBox,
    pub bounds_policy: BoundsPolicy,
    pub verbose: bool,
}

/// Runs the crop pipeline: decode, crop every frame, re-encode.
pub struct CropEngine {
    config: ProcessingConfig,
}

#[derive(Debug)]
pub struct CropSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub frame_count: usize,
    pub input_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub duration_ms: u32,
    pub repeat: Repeat,
    pub processing_time: Duration,
}

impl CropEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Crop a single animated GIF file.
    ///
    /// `progress` is called with the running frame count after each frame
    /// is cropped. Any failure aborts the whole operation; the output file
    /// is only written once every frame has been cropped.
    pub fn process_file<F>(&self, input: &Path, output: &Path, progress: F) -> Result<CropSummary>
    where
        F: Fn(usize),
    {
        let start = Instant::now();

        if !input.is_file() {
            return Err(GifCropError::FileNotFound(input.to_path_buf()));
        }
        crop::validate_dimensions(&self.config.crop)?;

        let mut decoder = FrameDecoder::open(input)?;
        let (screen_width, screen_height) = decoder.screen_dimensions();
        verbose_println(
            self.config.verbose,
            &format!(
                "Decoding {} ({}x{} logical screen)",
                input.display(),
                screen_width,
                screen_height
            ),
        );

        let resolved = crop::resolve_bounds(
            &self.config.crop,
            screen_width,
            screen_height,
            self.config.bounds_policy,
        )?;
        if resolved != self.config.crop {
            verbose_println(
                self.config.verbose,
                &format!(
                    "Crop box clamped to ({}, {}, {}, {})",
                    resolved.left, resolved.top, resolved.right, resolved.bottom
                ),
            );
        }

        // The encoder needs the complete sequence up front, so frames are
        // materialized here, cropped as they come off the decoder.
        let mut frames = Vec::new();
        for frame in &mut decoder {
            let frame = frame?;
            frames.push(crop::crop_frame(&frame, &resolved));
            progress(frames.len());
        }
        if frames.is_empty() {
            return Err(GifCropError::EmptySequence);
        }

        let duration_ms = decoder.duration_ms();
        let repeat = decoder.repeat();
        verbose_println(
            self.config.verbose,
            &format!(
                "Encoding {} frames at {}ms per frame ({})",
                frames.len(),
                duration_ms,
                describe_repeat(repeat)
            ),
        );

        encode::write_animation(output, &frames, duration_ms, repeat)?;

        Ok(CropSummary {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            frame_count: frames.len(),
            input_dimensions: (screen_width, screen_height),
            output_dimensions: (resolved.width(), resolved.height()),
            duration_ms,
            repeat,
            processing_time: start.elapsed(),
        })
    }
}

/// Human-readable loop count for diagnostics.
pub fn describe_repeat(repeat: Repeat) -> String {
    match repeat {
        Repeat::Infinite => "looping forever".to_string(),
        Repeat::Finite(0) => "playing once".to_string(),
        Repeat::Finite(n) => format!("looping {} times", n),
    }
}
