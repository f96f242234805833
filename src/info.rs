use crate::asset::ImageAsset;
use crate::constants::{DEFAULT_MAX_DIMENSION, UPLOAD_SIZE_THRESHOLD};
use crate::error::Result;
use crate::formats::MediaFormat;
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Prints what the pipeline would do with a file before any upload happens.
pub fn print_image_info(input_path: &Path) -> Result<()> {
    let asset = ImageAsset::from_path(input_path)?;

    println!("📋 Basic Information:");
    println!("  📁 File: {:?}", asset.path);
    println!("  🎭 Format: {:?}", asset.format);
    println!("  📦 File size: {} bytes", asset.byte_size);
    if asset.format.is_raster() {
        println!("  📏 Dimensions: {}x{} pixels", asset.width, asset.height);
        let aspect_ratio = asset.width as f64 / asset.height.max(1) as f64;
        println!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);
    }

    if asset.format == MediaFormat::Gif {
        print_animation_info(&asset)?;
    }

    println!("\n💡 Upload Plan:");
    if asset.format.is_raster() && asset.longest_side() > DEFAULT_MAX_DIMENSION {
        println!(
            "  📏 Longest side exceeds {} px: would be downscaled before upload",
            DEFAULT_MAX_DIMENSION
        );
    }
    if asset.byte_size >= UPLOAD_SIZE_THRESHOLD {
        println!(
            "  🗜️  At or above {} bytes: would be transcoded before upload",
            UPLOAD_SIZE_THRESHOLD
        );
    } else {
        println!("  ✅ Below the upload threshold: would be uploaded as-is");
    }

    Ok(())
}

fn print_animation_info(asset: &ImageAsset) -> Result<()> {
    let decoder = GifDecoder::new(BufReader::new(File::open(&asset.path)?)).map_err(|e| {
        crate::error::TranscodeError::Decode {
            path: asset.path.clone(),
            source: e,
        }
    })?;
    let frames = decoder.into_frames().collect_frames().map_err(|e| {
        crate::error::TranscodeError::Decode {
            path: asset.path.clone(),
            source: e,
        }
    })?;

    println!("  🎞️  Frames: {}", frames.len());
    if let Some(frame) = frames.first() {
        let (numer, denom) = frame.delay().numer_denom_ms();
        if denom != 0 && numer > 0 {
            println!("  ⏱️  Declared frame delay: {} ms", numer / denom);
        }
    }

    Ok(())
}
