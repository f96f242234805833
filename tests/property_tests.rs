use proptest::prelude::*;
use std::path::{Path, PathBuf};
use telepic::constants::{COMPRESS_MARKER, RESIZE_MARKER};
use telepic::{derived_path, fit_dimensions, MediaFormat, TranscodeConfig};

proptest! {
    #[test]
    fn fit_dimensions_noop_within_bounds(
        width in 1u32..=4000u32,
        height in 1u32..=4000u32,
    ) {
        let max_dimension = width.max(height);
        prop_assert_eq!(fit_dimensions(width, height, max_dimension), None);
    }

    #[test]
    fn fit_dimensions_caps_longest_side(
        width in 1u32..=4000u32,
        height in 1u32..=4000u32,
        max_dimension in 1u32..=4000u32,
    ) {
        if let Some((new_width, new_height)) = fit_dimensions(width, height, max_dimension) {
            // Longest side lands on the cap, within one pixel of rounding.
            let longest = new_width.max(new_height);
            prop_assert!(longest <= max_dimension);
            prop_assert!(longest + 1 >= max_dimension);
            // Never upsamples, never hits zero.
            prop_assert!(new_width <= width && new_height <= height);
            prop_assert!(new_width >= 1 && new_height >= 1);
        } else {
            prop_assert!(width.max(height) <= max_dimension);
        }
    }

    #[test]
    fn fit_dimensions_preserves_aspect_ratio(
        width in 64u32..=4000u32,
        height in 64u32..=4000u32,
        max_dimension in 32u32..=2000u32,
    ) {
        if let Some((new_width, new_height)) = fit_dimensions(width, height, max_dimension) {
            let source_ratio = width as f64 / height as f64;
            let result_ratio = new_width as f64 / new_height as f64;
            // Rounding tolerance scales with how small the output is.
            let tolerance = source_ratio / new_height.min(new_width) as f64 + 0.05;
            prop_assert!((source_ratio - result_ratio).abs() <= tolerance,
                "{}x{} -> {}x{}: {} vs {}",
                width, height, new_width, new_height, source_ratio, result_ratio);
        }
    }

    #[test]
    fn derived_path_keeps_extension_and_adds_marker(
        stem in "[a-z][a-z0-9]{0,12}",
        ext in prop::sample::select(&["jpg", "jpeg", "png", "gif"]),
    ) {
        let source = PathBuf::from(format!("{stem}.{ext}"));
        for marker in [RESIZE_MARKER, COMPRESS_MARKER] {
            let derived = derived_path(&source, marker);
            let name = derived.file_name().unwrap().to_string_lossy().into_owned();
            prop_assert_eq!(name.clone(), format!("{stem}{marker}.{ext}"));
            // The derived file still dispatches to the same format.
            prop_assert_eq!(
                MediaFormat::from_path(&derived),
                MediaFormat::from_path(&source)
            );
            // Applied exactly once.
            prop_assert_eq!(name.matches(marker).count(), 1);
        }
    }

    #[test]
    fn config_accepts_valid_ranges(
        quality in 1u8..=100u8,
        shrink in 0.01f32..=0.99f32,
    ) {
        let config = TranscodeConfig::new(None, None, Some(quality), Some(shrink));
        prop_assert!(config.is_ok());
    }

    #[test]
    fn config_rejects_out_of_range_quality(quality in 101u8..=255u8) {
        let config = TranscodeConfig::new(None, None, Some(quality), None);
        prop_assert!(config.is_err());
    }

    #[test]
    fn unsupported_extensions_never_classify(
        ext in prop::sample::select(&["txt", "doc", "webp", "bmp", "tiff", "avif", "pdf"]),
    ) {
        let path = PathBuf::from(format!("file.{ext}"));
        prop_assert_eq!(MediaFormat::from_path(&path), None);
    }
}

#[test]
fn fit_dimensions_reference_case() {
    assert_eq!(fit_dimensions(8000, 6000, 5600), Some((5600, 4200)));
}

#[test]
fn derived_path_is_bit_reproducible() {
    let a = derived_path(Path::new("/x/photo.png"), RESIZE_MARKER);
    let b = derived_path(Path::new("/x/photo.png"), RESIZE_MARKER);
    assert_eq!(a, b);
    assert_eq!(a, PathBuf::from("/x/photo_rz.png"));
}
