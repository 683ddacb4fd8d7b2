use image::{ImageBuffer, RgbaImage};

use crate::cli::BoundsPolicy;
use crate::error::{GifCropError, Result};

/// Crop rectangle as a half-open box: pixels with
/// `left <= x < right` and `top <= y < bottom` are kept.
///
/// Coordinates are signed so that out-of-range command-line values reach
/// [`validate_dimensions`] instead of failing at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropBox {
    /// Output width in pixels. Only meaningful for a validated box.
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    /// Output height in pixels. Only meaningful for a validated box.
    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }
}

/// Check the ordering and non-negativity invariants of a crop box.
///
/// Pure, no side effects. Does not check the box against actual frame
/// bounds; that happens in [`resolve_bounds`] once the frame size is known.
pub fn validate_dimensions(crop: &CropBox) -> Result<()> {
    if crop.left >= crop.right {
        return Err(GifCropError::InvalidDimensions(format!(
            "left coordinate ({}) must be less than right coordinate ({})",
            crop.left, crop.right
        )));
    }
    if crop.top >= crop.bottom {
        return Err(GifCropError::InvalidDimensions(format!(
            "top coordinate ({}) must be less than bottom coordinate ({})",
            crop.top, crop.bottom
        )));
    }
    if crop.left < 0 || crop.top < 0 || crop.right < 0 || crop.bottom < 0 {
        return Err(GifCropError::InvalidDimensions(
            "coordinates cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Resolve a validated crop box against the frame extent.
///
/// With `BoundsPolicy::Reject` any overflow is an error. With
/// `BoundsPolicy::Clamp` the right/bottom edges are trimmed to the frame;
/// a box lying entirely outside the frame is still rejected because it
/// would produce an empty raster.
pub fn resolve_bounds(
    crop: &CropBox,
    frame_width: u32,
    frame_height: u32,
    policy: BoundsPolicy,
) -> Result<CropBox> {
    let out_of_bounds = || GifCropError::CropOutOfBounds {
        left: crop.left,
        top: crop.top,
        right: crop.right,
        bottom: crop.bottom,
        width: frame_width,
        height: frame_height,
    };

    match policy {
        BoundsPolicy::Reject => {
            if crop.right > i64::from(frame_width) || crop.bottom > i64::from(frame_height) {
                return Err(out_of_bounds());
            }
            Ok(*crop)
        }
        BoundsPolicy::Clamp => {
            let clamped = CropBox {
                left: crop.left,
                top: crop.top,
                right: crop.right.min(i64::from(frame_width)),
                bottom: crop.bottom.min(i64::from(frame_height)),
            };
            if clamped.left >= clamped.right || clamped.top >= clamped.bottom {
                return Err(out_of_bounds());
            }
            Ok(clamped)
        }
    }
}

/// Copy the pixels inside `crop` out of a composed frame.
///
/// The box must already be validated and resolved against the frame
/// bounds. Frames are RGBA throughout the pipeline, so transparency
/// survives the copy.
pub fn crop_frame(frame: &RgbaImage, crop: &CropBox) -> RgbaImage {
    let (x, y) = (crop.left as u32, crop.top as u32);
    let mut output = ImageBuffer::new(crop.width(), crop.height());

    for (out_x, out_y, pixel) in output.enumerate_pixels_mut() {
        if let Some(src_pixel) = frame.get_pixel_checked(x + out_x, y + out_y) {
            *pixel = *src_pixel;
        }
    }

    output
}
