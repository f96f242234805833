/// Longest-side cap applied to static images before upload, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 5600;

/// Byte-size ceiling the size-bounded compressor converges to (5000 KiB).
pub const DEFAULT_TARGET_SIZE_BYTES: u64 = 5000 * 1024;

pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Per-iteration dimension multiplier of the compression loop.
pub const DEFAULT_SHRINK_FACTOR: f32 = 0.8;

/// Files at or above this size are transcoded before upload (5120 KiB).
pub const UPLOAD_SIZE_THRESHOLD: u64 = 5120 * 1024;

/// Longest-side cap for individual GIF frames. Telegraph tolerates far less
/// animated payload than static payload, so this is independent of
/// `DEFAULT_MAX_DIMENSION`.
pub const GIF_FRAME_DIMENSION_CAP: u32 = 250;

/// Uniform inter-frame delay used when the source declares none.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// Dimension floor of the compression loop. Once both sides reach this the
/// loop stops even if the byte target was not met.
pub const MIN_OUTPUT_DIMENSION: u32 = 1;

/// Derived-file markers, inserted once before the extension.
pub const RESIZE_MARKER: &str = "_rz";
pub const COMPRESS_MARKER: &str = "_compressed";

/// Pause between consecutive uploads, Telegraph rate-limit courtesy.
pub const UPLOAD_PAUSE_MS: u64 = 2000;
pub const UPLOAD_TIMEOUT_SECS: u64 = 30;

pub const TELEGRAPH_UPLOAD_URL: &str = "https://telegra.ph/upload";
pub const TELEGRAPH_API_BASE: &str = "https://api.telegra.ph";
pub const TELEGRAPH_FILE_BASE: &str = "https://telegra.ph";

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
