pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod utils;

pub use batch::{BatchEntry, ProgressFn};
pub use config::{CompressionConfig, ConfigUpdate};
pub use engine::{CompressionResult, Compressor, SourceImage};
pub use error::{CompressionError, Result};
pub use estimate::{compression_factor, estimate, estimate_size, SizeEstimate};
pub use formats::{resolve_format_override, ImageType, OutputFormat};
pub use processing::{batch_compress_files, compress_file, estimate_files};
pub use utils::{collect_image_files, derive_output_name, format_file_size};
