pub const DEFAULT_QUALITY: f32 = 0.8;

/// Suffix inserted before the last extension separator of a compressed file name.
pub const COMPRESSED_NAME_SUFFIX: &str = "-compressed";

/// Upper bound on raster source size accepted for decoding (100 MiB).
pub const MAX_SOURCE_BYTES: u64 = 100 * 1024 * 1024;
/// Upper bound on either pixel dimension of a decoded image.
pub const MAX_PIXEL_DIMENSION: u32 = 16_384;

/// Hard cap on the number of files a single batch invocation accepts.
pub const MAX_BATCH_FILES: usize = 100;
/// Batch fan-out never exceeds this many concurrent encodes unless overridden.
pub const DEFAULT_MAX_WORKERS: usize = 8;
/// Headroom kept free when deriving the worker count from available memory.
pub const MIN_AVAILABLE_MEMORY_MIB: u64 = 512;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
/// Quality at or above which PNG optimization switches to Zopfli.
pub const ZOPFLI_QUALITY_THRESHOLD: f32 = 0.9;
/// Quality at or above which PNG optimization uses the high deflate level.
pub const HIGH_DEFLATE_QUALITY_THRESHOLD: f32 = 0.7;

pub const AVIF_ENCODE_SPEED: u8 = 4;

// Estimation curve constants. Tuned by inspection, not derived from the
// encoders; the factor curves in estimate.rs document how they combine.
pub const JPEG_FACTOR_EXPONENT: f64 = 1.5;
pub const WEBP_FACTOR_EXPONENT: f64 = 1.7;
pub const PNG_FACTOR_BASE: f64 = 0.7;
pub const PNG_FACTOR_RANGE: f64 = 0.3;
/// An estimate never predicts below this share of the original size.
pub const ESTIMATE_FLOOR_RATIO: f64 = 0.10;
/// An estimate never predicts above this share of the original size.
pub const ESTIMATE_CEIL_RATIO: f64 = 0.95;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
