use crate::asset::{derived_path, ImageAsset};
use crate::constants::RESIZE_MARKER;
use crate::error::{Result, TranscodeError};
use image::imageops::FilterType;
use image::ImageReader;

/// Computes the aspect-preserving dimensions that fit `max_dimension`, or
/// `None` when the image is already within bounds. Never upsamples.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_dimension {
        return None;
    }

    let ratio = max_dimension as f64 / longest as f64;
    let new_width = ((width as f64 * ratio) as u32).max(1);
    let new_height = ((height as f64 * ratio) as u32).max(1);
    Some((new_width, new_height))
}

/// Downscales an asset so its longest side fits `max_dimension`.
///
/// Returns the asset unchanged (same path, no new file) when it already fits.
/// Otherwise the resampled image is written to a derived `_rz` path and a new
/// asset for that file is returned; the source file is left as-is.
pub fn limit_dimensions(asset: ImageAsset, max_dimension: u32) -> Result<ImageAsset> {
    let Some((new_width, new_height)) = fit_dimensions(asset.width, asset.height, max_dimension)
    else {
        return Ok(asset);
    };

    crate::verbose!(
        "resizing {} from {}x{} to {}x{}",
        asset.path.display(),
        asset.width,
        asset.height,
        new_width,
        new_height
    );

    let img = ImageReader::open(&asset.path)?
        .decode()
        .map_err(|e| TranscodeError::Decode {
            path: asset.path.clone(),
            source: e,
        })?;

    let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
    let output = derived_path(&asset.path, RESIZE_MARKER);
    resized.save(&output).map_err(|e| TranscodeError::Encode {
        path: output.clone(),
        reason: e.to_string(),
    })?;

    ImageAsset::from_path(&output)
}
