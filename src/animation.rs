use crate::asset::{derived_path, ImageAsset};
use crate::constants::{COMPRESS_MARKER, DEFAULT_FRAME_DURATION_MS};
use crate::error::{Result, TranscodeError};
use crate::resize::fit_dimensions;
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{AnimationDecoder, Delay, DynamicImage, Frame};
use std::fs::File;
use std::io::{BufReader, BufWriter};

/// Re-encodes an animated GIF with every frame fitted to
/// `frame_dimension_cap`.
///
/// The full frame sequence is decoded up front; any frame-level failure
/// fails the whole operation with no partial output. Frames already within
/// the cap keep their pixels, oversized ones are resampled
/// aspect-preserving. All frames are flattened to three-channel color before
/// re-encoding, and the source's declared delay (read once, 100 ms when
/// absent) is applied uniformly — variable per-frame timing is deliberately
/// collapsed. The result lands at a derived `_compressed` path.
pub fn recompress_animation(asset: &ImageAsset, frame_dimension_cap: u32) -> Result<ImageAsset> {
    let reader = BufReader::new(File::open(&asset.path)?);
    let decoder = GifDecoder::new(reader).map_err(|e| TranscodeError::Decode {
        path: asset.path.clone(),
        source: e,
    })?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| TranscodeError::Decode {
            path: asset.path.clone(),
            source: e,
        })?;

    let delay = uniform_delay(&frames);
    crate::verbose!(
        "re-encoding {} ({} frames, cap {})",
        asset.path.display(),
        frames.len(),
        frame_dimension_cap
    );

    let output = derived_path(&asset.path, COMPRESS_MARKER);
    {
        let file = File::create(&output).map_err(|e| TranscodeError::Encode {
            path: output.clone(),
            reason: e.to_string(),
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TranscodeError::Encode {
                path: output.clone(),
                reason: e.to_string(),
            })?;

        let resampled: Vec<Frame> = frames
            .into_iter()
            .map(|frame| resample_frame(frame, frame_dimension_cap, delay))
            .collect();
        encoder
            .encode_frames(resampled)
            .map_err(|e| TranscodeError::Encode {
                path: output.clone(),
                reason: e.to_string(),
            })?;
    }

    ImageAsset::from_path(&output)
}

/// One delay for the whole sequence: the first frame's declared delay, or
/// the default when the source declares none.
fn uniform_delay(frames: &[Frame]) -> Delay {
    let declared_ms = frames
        .first()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            if denom == 0 {
                0
            } else {
                numer / denom
            }
        })
        .unwrap_or(0);

    if declared_ms == 0 {
        Delay::from_numer_denom_ms(DEFAULT_FRAME_DURATION_MS, 1)
    } else {
        Delay::from_numer_denom_ms(declared_ms, 1)
    }
}

/// Fits a frame to the cap and flattens it to RGB. The GIF encoder stores
/// RGBA buffers, so the flattened pixels are wrapped back with opaque alpha.
fn resample_frame(frame: Frame, cap: u32, delay: Delay) -> Frame {
    let buffer = frame.into_buffer();
    let (width, height) = buffer.dimensions();

    let flattened = match fit_dimensions(width, height, cap) {
        Some((new_width, new_height)) => DynamicImage::ImageRgba8(buffer)
            .resize_exact(new_width, new_height, FilterType::Lanczos3)
            .to_rgb8(),
        None => DynamicImage::ImageRgba8(buffer).to_rgb8(),
    };

    Frame::from_parts(DynamicImage::ImageRgb8(flattened).to_rgba8(), 0, 0, delay)
}
