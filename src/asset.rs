use crate::error::{Result, TranscodeError};
use crate::formats::MediaFormat;
use image::ImageReader;
use std::fs;
use std::path::{Path, PathBuf};

/// A media file as the pipeline sees it: where it lives, what it is, how big
/// it is. Transcode steps never mutate the file behind an asset; they produce
/// a new asset at a derived path and leave the source untouched.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub format: MediaFormat,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
}

impl ImageAsset {
    /// Reads dimensions from the image header (no full decode) and size from
    /// file metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TranscodeError::FileNotFound(path.to_path_buf()));
        }

        let format = MediaFormat::from_path(path).ok_or_else(|| {
            TranscodeError::UnsupportedFormat(
                path.extension()
                    .and_then(|s| s.to_str())
                    .unwrap_or("<none>")
                    .to_string(),
            )
        })?;

        let byte_size = fs::metadata(path)?.len();

        // Video passes through the pipeline untouched, so its dimensions are
        // never consulted.
        let (width, height) = if format.is_raster() {
            ImageReader::open(path)?
                .with_guessed_format()?
                .into_dimensions()
                .map_err(|e| TranscodeError::Decode {
                    path: path.to_path_buf(),
                    source: e,
                })?
        } else {
            (0, 0)
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
            width,
            height,
            byte_size,
        })
    }

    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Inserts a marker between the file stem and the extension:
/// `photo.png` + `_rz` -> `photo_rz.png`. The convention is fixed so that
/// derived names are reproducible; an existing file of the derived name is
/// overwritten.
pub fn derived_path(path: &Path, marker: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_file_name(format!("{stem}{marker}.{ext}")),
        None => path.with_file_name(format!("{stem}{marker}")),
    }
}
