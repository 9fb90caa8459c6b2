use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("Unsupported input type: {0}. Only image files can be compressed")]
    UnsupportedType(String),

    #[error("Failed to decode image: {0}")]
    Decode(image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(image::ImageError),

    #[error("Encoding produced no output")]
    EmptyEncodeOutput,

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be greater than 0 and at most 1")]
    InvalidQuality(f32),

    #[error("Image dimensions {0}x{1} exceed the maximum of {2}x{2}")]
    DimensionsTooLarge(u32, u32, u32),

    #[error("Source too large: {0} bytes. Maximum allowed: {1} bytes")]
    SourceTooLarge(u64, u64),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No input files were supplied")]
    EmptyBatch,

    #[error("No usable image files in the input")]
    NoValidInput,

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
