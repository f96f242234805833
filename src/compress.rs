use crate::asset::{derived_path, ImageAsset};
use crate::constants::{
    COMPRESS_MARKER, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, MIN_OUTPUT_DIMENSION,
    ZOPFLI_ITERATIONS,
};
use crate::error::{Result, TranscodeError};
use crate::formats::MediaFormat;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Iteratively re-encodes a static image at shrinking dimensions until its
/// byte size falls at or under `target_size_bytes`.
///
/// The source is copied to a derived `_compressed` path first; every
/// iteration reopens that copy, multiplies both dimensions by
/// `shrink_factor`, re-encodes at `quality` and remeasures. The original
/// file is never touched. A source already at or under the target returns
/// the copy without a single resize pass.
///
/// Termination is explicit: each iteration strictly shrinks the pixel count,
/// and once both sides reach `MIN_OUTPUT_DIMENSION` the loop stops and
/// returns the smallest achievable artifact even if the target was not met
/// (logged as unreachable).
pub fn compress_to_size(
    asset: &ImageAsset,
    target_size_bytes: u64,
    quality: u8,
    shrink_factor: f32,
) -> Result<ImageAsset> {
    let output = derived_path(&asset.path, COMPRESS_MARKER);
    fs::copy(&asset.path, &output)?;

    let mut current_size = fs::metadata(&output)?.len();
    while current_size > target_size_bytes {
        let img = ImageReader::open(&output)?
            .decode()
            .map_err(|e| TranscodeError::Decode {
                path: output.clone(),
                source: e,
            })?;

        let (width, height) = (img.width(), img.height());
        if width <= MIN_OUTPUT_DIMENSION && height <= MIN_OUTPUT_DIMENSION {
            crate::warn!(
                "target of {} bytes unreachable for {}; stopping at {}x{} ({} bytes)",
                target_size_bytes,
                output.display(),
                width,
                height,
                current_size
            );
            break;
        }

        let new_width = shrink_side(width, shrink_factor);
        let new_height = shrink_side(height, shrink_factor);
        let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
        save_lossy(&resized, &output, asset.format, quality)?;

        current_size = fs::metadata(&output)?.len();
        crate::verbose!(
            "shrunk {} to {}x{}, {} bytes",
            output.display(),
            new_width,
            new_height,
            current_size
        );
    }

    ImageAsset::from_path(&output)
}

/// One side after a shrink iteration. Clamped so every pass loses at least
/// one pixel until the floor is reached.
fn shrink_side(side: u32, shrink_factor: f32) -> u32 {
    let shrunk = (side as f32 * shrink_factor) as u32;
    shrunk.clamp(
        MIN_OUTPUT_DIMENSION,
        side.saturating_sub(1).max(MIN_OUTPUT_DIMENSION),
    )
}

/// Re-encodes an image at the given quality. JPEG maps quality directly onto
/// the encoder; PNG is written losslessly and then squeezed with oxipng,
/// picking the deflater tier from the quality setting.
pub fn save_lossy(
    img: &DynamicImage,
    output: &Path,
    format: MediaFormat,
    quality: u8,
) -> Result<()> {
    match format {
        MediaFormat::Jpeg => {
            let file = File::create(output).map_err(|e| TranscodeError::Encode {
                path: output.to_path_buf(),
                reason: e.to_string(),
            })?;
            let mut writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| TranscodeError::Encode {
                    path: output.to_path_buf(),
                    reason: e.to_string(),
                })?;
            writer.flush().map_err(|e| TranscodeError::Encode {
                path: output.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        MediaFormat::Png => {
            let temp_path = output.with_extension("temp.png");
            img.save_with_format(&temp_path, image::ImageFormat::Png)
                .map_err(|e| TranscodeError::Encode {
                    path: temp_path.clone(),
                    reason: e.to_string(),
                })?;

            struct TempFileGuard(PathBuf);
            impl Drop for TempFileGuard {
                fn drop(&mut self) {
                    let _ = fs::remove_file(&self.0);
                }
            }
            let _guard = TempFileGuard(temp_path.clone());

            let mut oxipng_options = Options::from_preset(4);
            oxipng_options.force = true;

            if quality >= 90 {
                oxipng_options.deflate = Deflaters::Zopfli {
                    iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
                };
            } else if quality >= 70 {
                oxipng_options.deflate = Deflaters::Libdeflater {
                    compression: LIBDEFLATER_HIGH_LEVEL,
                };
            } else {
                oxipng_options.deflate = Deflaters::Libdeflater {
                    compression: LIBDEFLATER_LOW_LEVEL,
                };
            }

            let input = InFile::Path(temp_path.clone());
            let out = OutFile::Path {
                path: Some(output.to_path_buf()),
                preserve_attrs: false,
            };
            oxipng::optimize(&input, &out, &oxipng_options)
                .map_err(|e| TranscodeError::PngOptimization(e.to_string()))?;
        }
        other => {
            return Err(TranscodeError::UnsupportedFormat(format!("{:?}", other)));
        }
    }

    Ok(())
}
