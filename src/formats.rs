/// Type-safe handling of the media formats Telegraph accepts.
///
/// The upload boundary rejects anything outside this set before any decode
/// is attempted; the transcoding core only ever sees these formats.
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Jpeg,
    Png,
    Gif,
    Mp4,
}

impl MediaFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaFormat::Jpeg),
            "png" => Some(MediaFormat::Png),
            "gif" => Some(MediaFormat::Gif),
            "mp4" => Some(MediaFormat::Mp4),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "jpg",
            MediaFormat::Png => "png",
            MediaFormat::Gif => "gif",
            MediaFormat::Mp4 => "mp4",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaFormat::Jpeg => "image/jpeg",
            MediaFormat::Png => "image/png",
            MediaFormat::Gif => "image/gif",
            MediaFormat::Mp4 => "video/mp4",
        }
    }

    /// Multi-frame raster with display timing (routes to the animation
    /// recompressor).
    pub fn is_animated(&self) -> bool {
        matches!(self, MediaFormat::Gif)
    }

    /// Pixel formats the transcoding core can decode. Video is uploaded
    /// as-is and never enters the pipeline.
    pub fn is_raster(&self) -> bool {
        !matches!(self, MediaFormat::Mp4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(MediaFormat::from_extension("jpg"), Some(MediaFormat::Jpeg));
        assert_eq!(MediaFormat::from_extension("jpeg"), Some(MediaFormat::Jpeg));
        assert_eq!(MediaFormat::from_extension("PNG"), Some(MediaFormat::Png));
        assert_eq!(MediaFormat::from_extension("gif"), Some(MediaFormat::Gif));
        assert_eq!(MediaFormat::from_extension("mp4"), Some(MediaFormat::Mp4));
        assert_eq!(MediaFormat::from_extension("txt"), None);
        assert_eq!(MediaFormat::from_extension("webp"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            MediaFormat::from_path(Path::new("photo.JPG")),
            Some(MediaFormat::Jpeg)
        );
        assert_eq!(MediaFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(MediaFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(MediaFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(MediaFormat::Png.mime_type(), "image/png");
        assert_eq!(MediaFormat::Gif.mime_type(), "image/gif");
        assert_eq!(MediaFormat::Mp4.mime_type(), "video/mp4");
    }

    #[test]
    fn test_animated_and_raster_split() {
        assert!(MediaFormat::Gif.is_animated());
        assert!(!MediaFormat::Jpeg.is_animated());
        assert!(MediaFormat::Gif.is_raster());
        assert!(MediaFormat::Png.is_raster());
        assert!(!MediaFormat::Mp4.is_raster());
    }
}
