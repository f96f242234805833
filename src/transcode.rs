use crate::animation::recompress_animation;
use crate::asset::ImageAsset;
use crate::compress::compress_to_size;
use crate::constants::{
    DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, DEFAULT_SHRINK_FACTOR, DEFAULT_TARGET_SIZE_BYTES,
    GIF_FRAME_DIMENSION_CAP, MAX_QUALITY, MIN_QUALITY,
};
use crate::error::{Result, TranscodeError};
use crate::formats::MediaFormat;

/// Immutable knobs of the transcoding pipeline, validated at construction.
#[derive(Debug, Clone)]
pub struct TranscodeConfig {
    /// Longest-side cap for the caller-level dimension pass.
    pub max_dimension: u32,
    /// Byte ceiling the size-bounded compressor converges to.
    pub target_size_bytes: u64,
    /// Lossy re-encode quality, 1-100.
    pub quality: u8,
    /// Per-iteration dimension multiplier, strictly between 0 and 1.
    pub shrink_factor: f32,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            target_size_bytes: DEFAULT_TARGET_SIZE_BYTES,
            quality: DEFAULT_QUALITY,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
        }
    }
}

impl TranscodeConfig {
    pub fn new(
        max_dimension: Option<u32>,
        target_size_bytes: Option<u64>,
        quality: Option<u8>,
        shrink_factor: Option<f32>,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(TranscodeError::InvalidQuality(quality));
        }

        let shrink_factor = shrink_factor.unwrap_or(DEFAULT_SHRINK_FACTOR);
        if !(shrink_factor > 0.0 && shrink_factor < 1.0) {
            return Err(TranscodeError::InvalidShrinkFactor(shrink_factor));
        }

        Ok(Self {
            max_dimension: max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION),
            target_size_bytes: target_size_bytes.unwrap_or(DEFAULT_TARGET_SIZE_BYTES),
            quality,
            shrink_factor,
        })
    }
}

/// Routes an asset to the format-appropriate compression path and returns
/// the resulting asset.
///
/// Animated images get frame resampling under the fixed frame cap; static
/// rasters get size-bounded compression; video passes through untouched.
/// The dimension pass ([`crate::resize::limit_dimensions`]) is a separate
/// caller-orchestrated stage and is not re-run here. No state is carried
/// between invocations.
pub fn transcode(asset: ImageAsset, config: &TranscodeConfig) -> Result<ImageAsset> {
    match asset.format {
        MediaFormat::Gif => recompress_animation(&asset, GIF_FRAME_DIMENSION_CAP),
        MediaFormat::Jpeg | MediaFormat::Png => compress_to_size(
            &asset,
            config.target_size_bytes,
            config.quality,
            config.shrink_factor,
        ),
        MediaFormat::Mp4 => Ok(asset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_defaults() {
        let config = TranscodeConfig::new(None, None, None, None).unwrap();
        assert_eq!(config.max_dimension, 5600);
        assert_eq!(config.target_size_bytes, 5_120_000);
        assert_eq!(config.quality, 85);
        assert!((config.shrink_factor - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_invalid_quality() {
        let result = TranscodeConfig::new(None, None, Some(0), None);
        assert!(matches!(result, Err(TranscodeError::InvalidQuality(0))));

        let result = TranscodeConfig::new(None, None, Some(101), None);
        assert!(matches!(result, Err(TranscodeError::InvalidQuality(101))));
    }

    #[test]
    fn test_config_invalid_shrink_factor() {
        for bad in [0.0f32, 1.0, 1.5, -0.5] {
            let result = TranscodeConfig::new(None, None, None, Some(bad));
            assert!(
                matches!(result, Err(TranscodeError::InvalidShrinkFactor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_video_passes_through() {
        let asset = ImageAsset {
            path: PathBuf::from("clip.mp4"),
            format: MediaFormat::Mp4,
            width: 0,
            height: 0,
            byte_size: 123,
        };
        let config = TranscodeConfig::default();
        let result = transcode(asset.clone(), &config).unwrap();
        assert_eq!(result.path, asset.path);
        assert_eq!(result.byte_size, 123);
    }
}
