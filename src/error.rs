use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid shrink factor: {0}. Must be strictly between 0 and 1")]
    InvalidShrinkFactor(f32),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Telegraph upload error: {0}")]
    Upload(String),

    #[error("Telegraph page creation error: {0}")]
    PageCreation(String),
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
