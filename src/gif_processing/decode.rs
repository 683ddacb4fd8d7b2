use gif::{ColorOutput, DecodeOptions, DisposalMethod, Repeat};
use image::{Rgba, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;

/// Display time applied when the source animation carries no delay of its
/// own (a zero GCE delay reads the same as a missing one).
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Lazy single-pass decoder that yields every frame of an animated GIF as
/// a full independent RGBA raster at the logical screen size.
///
/// GIF frames are stored as deltas: sub-rectangles composited over the
/// previous screen state according to a per-frame disposal method. The
/// decoder keeps a persistent canvas and replays that compositing, so
/// callers never see partial frames. The sequence ends with `None`, never
/// with an error.
pub struct FrameDecoder {
    reader: gif::Decoder<BufReader<File>>,
    canvas: RgbaImage,
    previous: Option<RgbaImage>,
    first_delay: Option<u16>,
    finished: bool,
}

impl FrameDecoder {
    /// Open a GIF file and read its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::RGBA);
        let reader = options.read_info(BufReader::new(file))?;

        let width = u32::from(reader.width());
        let height = u32::from(reader.height());

        Ok(Self {
            reader,
            canvas: RgbaImage::new(width, height),
            previous: None,
            first_delay: None,
            finished: false,
        })
    }

    /// Logical screen dimensions from the GIF header. Every composed frame
    /// has exactly this size.
    pub fn screen_dimensions(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Loop count from the Netscape application extension.
    pub fn repeat(&self) -> Repeat {
        self.reader.repeat()
    }

    /// Per-frame display time in milliseconds, read from the first frame.
    /// Available once at least one frame has been decoded.
    pub fn duration_ms(&self) -> u32 {
        match self.first_delay {
            Some(delay) if delay > 0 => u32::from(delay) * 10,
            _ => DEFAULT_FRAME_DURATION_MS,
        }
    }

    fn next_composed(&mut self) -> Result<Option<RgbaImage>> {
        let frame = match self.reader.read_next_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        if self.first_delay.is_none() {
            self.first_delay = Some(frame.delay);
        }

        let left = u32::from(frame.left);
        let top = u32::from(frame.top);
        let frame_width = u32::from(frame.width);
        let frame_height = u32::from(frame.height);
        let dispose = frame.dispose;

        // Previous-disposal frames restore the screen state from before
        // this frame was drawn, so snapshot the canvas first.
        if dispose == DisposalMethod::Previous {
            self.previous = Some(self.canvas.clone());
        }

        let canvas_width = self.canvas.width();
        let canvas_height = self.canvas.height();

        for y in 0..frame_height {
            for x in 0..frame_width {
                let idx = ((y * frame_width + x) * 4) as usize;
                let pixel = [
                    frame.buffer[idx],
                    frame.buffer[idx + 1],
                    frame.buffer[idx + 2],
                    frame.buffer[idx + 3],
                ];
                // GIF transparency is binary: transparent pixels leave the
                // canvas untouched, everything else replaces it.
                if pixel[3] == 0 {
                    continue;
                }
                let canvas_x = left + x;
                let canvas_y = top + y;
                if canvas_x < canvas_width && canvas_y < canvas_height {
                    self.canvas.put_pixel(canvas_x, canvas_y, Rgba(pixel));
                }
            }
        }

        let composed = self.canvas.clone();

        match dispose {
            DisposalMethod::Any | DisposalMethod::Keep => {}
            DisposalMethod::Background => {
                let clear_right = (left + frame_width).min(canvas_width);
                let clear_bottom = (top + frame_height).min(canvas_height);
                for y in top.min(canvas_height)..clear_bottom {
                    for x in left.min(canvas_width)..clear_right {
                        self.canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                    }
                }
            }
            DisposalMethod::Previous => {
                if let Some(previous) = self.previous.take() {
                    self.canvas = previous;
                }
            }
        }

        Ok(Some(composed))
    }
}

impl Iterator for FrameDecoder {
    type Item = Result<RgbaImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_composed() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
