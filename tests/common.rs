use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, ImageBuffer, Rgb, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Writes a real decodable PNG of the given dimensions.
pub fn create_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    noise_image(width, height).save(&path).unwrap();
    path
}

/// Writes a real decodable JPEG of the given dimensions.
pub fn create_test_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    noise_image(width, height)
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .unwrap();
    path
}

/// Writes a real animated GIF with the given frame count and delay.
pub fn create_test_gif(
    dir: &Path,
    name: &str,
    frames: u32,
    width: u32,
    height: u32,
    delay_ms: u32,
) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite).unwrap();

    let sequence = (0..frames).map(|i| {
        let shade = ((i * 40) % 256) as u8;
        let buffer: RgbaImage =
            ImageBuffer::from_pixel(width, height, Rgba([shade, shade, shade, 255]));
        Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    });
    encoder.encode_frames(sequence).unwrap();

    path
}

/// Incompressible noise so encoded size tracks pixel count.
fn noise_image(width: u32, height: u32) -> DynamicImage {
    let mut state = 0x9E3779B97F4A7C15u64;
    let buffer = ImageBuffer::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bytes = state.to_le_bytes();
        Rgb([bytes[0], bytes[1], bytes[2]])
    });
    DynamicImage::ImageRgb8(buffer)
}
