use gif::{DisposalMethod, Encoder, Frame, Repeat};
use image::RgbaImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GifCropError, Result};

/// Palette quantization speed for `Frame::from_rgba_speed` (1 = best
/// quality, 30 = fastest). Frames with at most 256 distinct colors get an
/// exact palette regardless of this setting.
const QUANTIZATION_SPEED: i32 = 10;

/// Encode a frame sequence into an animated GIF file.
///
/// `duration_ms` is applied uniformly to every frame; `repeat` is written
/// as the Netscape loop extension. All frames must share the dimensions of
/// the first one, which they do by construction in this pipeline.
pub fn write_animation(
    path: &Path,
    frames: &[RgbaImage],
    duration_ms: u32,
    repeat: Repeat,
) -> Result<()> {
    let first = frames.first().ok_or(GifCropError::EmptySequence)?;
    let (width, height) = first.dimensions();
    let (width, height) = (width as u16, height as u16);

    // GIF delays are in centiseconds
    let delay = (duration_ms / 10).min(u32::from(u16::MAX)) as u16;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    {
        let mut encoder = Encoder::new(&mut writer, width, height, &[])?;
        encoder.set_repeat(repeat)?;

        for image in frames {
            let mut pixels = image.as_raw().clone();
            let mut frame = Frame::from_rgba_speed(width, height, &mut pixels, QUANTIZATION_SPEED);
            frame.delay = delay;
            // Every frame is a standalone full raster, so the screen must
            // be cleared before the next one; Keep disposal would leave
            // stale pixels showing through transparent areas.
            frame.dispose = DisposalMethod::Background;
            encoder.write_frame(&frame)?;
        }
        // encoder writes the trailer when dropped
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gif_processing::decode::FrameDecoder;
    use image::{ImageBuffer, Rgba};

    fn solid_frame(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        ImageBuffer::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");

        let err = write_animation(&path, &[], 100, Repeat::Infinite).unwrap_err();
        assert!(matches!(err, GifCropError::EmptySequence));
        assert!(!path.exists());
    }

    #[test]
    fn test_written_animation_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three_frames.gif");

        let frames = vec![
            solid_frame(6, 6, [255, 0, 0, 255]),
            solid_frame(6, 6, [0, 255, 0, 255]),
            solid_frame(6, 6, [0, 0, 255, 255]),
        ];
        write_animation(&path, &frames, 200, Repeat::Infinite).unwrap();

        let mut decoder = FrameDecoder::open(&path).unwrap();
        let decoded: Vec<RgbaImage> = (&mut decoder)
            .collect::<crate::error::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(decoded.len(), 3);
        for (written, read) in frames.iter().zip(&decoded) {
            assert_eq!(read.dimensions(), (6, 6));
            // few distinct colors, so the palette is exact
            assert_eq!(written, read);
        }
        assert_eq!(decoder.duration_ms(), 200);
        assert_eq!(decoder.repeat(), Repeat::Infinite);
    }

    #[test]
    fn test_transparent_frames_do_not_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transparent.gif");

        // second frame is mostly transparent; a decoder must not see the
        // first frame's pixels shining through after re-encode
        let mut patch = solid_frame(4, 4, [0, 0, 0, 0]);
        patch.put_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let frames = vec![solid_frame(4, 4, [255, 0, 0, 255]), patch];

        write_animation(&path, &frames, 100, Repeat::Infinite).unwrap();

        let mut decoder = FrameDecoder::open(&path).unwrap();
        let decoded: Vec<RgbaImage> = (&mut decoder)
            .collect::<crate::error::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded[1].get_pixel(1, 1), &Rgba([0, 255, 0, 255]));
        assert_eq!(&frames[1], &decoded[1]);
    }

    #[test]
    fn test_finite_repeat_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finite.gif");

        let frames = vec![solid_frame(4, 4, [10, 20, 30, 255])];
        write_animation(&path, &frames, 100, Repeat::Finite(3)).unwrap();

        let mut decoder = FrameDecoder::open(&path).unwrap();
        let decoded: Vec<RgbaImage> = (&mut decoder)
            .collect::<crate::error::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoder.repeat(), Repeat::Finite(3));
    }
}
