use crate::config::CompressionConfig;
use crate::constants::DEFAULT_QUALITY;
use crate::error::Result;
use crate::formats::resolve_format_override;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "img-slim",
    about = "A fast in-memory image compression tool with batch processing and size estimation",
    long_about = "img-slim is a Rust-based image compression tool that reduces file sizes while maintaining quality. \
                  It decodes images in memory, optionally resizes them preserving aspect ratio, and re-encodes them \
                  at a configurable quality. Supports JPEG, PNG, WebP, GIF and AVIF output with advanced PNG \
                  optimization using oxipng, parallel batch compression, and pre-compression size estimation.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-slim compress photo.jpg -q 0.7 --max-width 1920\n  \
    img-slim compress logo.png out/logo.webp\n  \
    img-slim batch \"./shots/*.png\" ./compressed -r -q 0.8 -f webp\n  \
    img-slim estimate ./shots -q 0.6"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Suppress all non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Print additional diagnostic output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Compress a single image file with customizable quality, size, and format options. \
                      Without an explicit output path the result is written next to the input under the \
                      derived '-compressed' name."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            help = "Output image file path (default: derived name next to the input)",
            long_help = "Output image file path. A recognized extension selects the output format when \
                         no --format flag is given; unknown extensions keep the source format."
        )]
        output: Option<PathBuf>,

        #[arg(
            short = 'q',
            long,
            help = "Compression quality fraction (0-1, default: 0.8)",
            long_help = "Compression quality from just above 0 (smallest) to 1 (best). \
                         For PNG: >=0.9 uses Zopfli, >=0.7 uses high compression, below that standard compression."
        )]
        quality: Option<f32>,

        #[arg(
            short = 'w',
            long,
            help = "Maximum width in pixels",
            long_help = "Resize the image to a maximum width while preserving aspect ratio. \
                         The image is only resized if it is wider than this. 0 means unbounded."
        )]
        max_width: Option<u32>,

        #[arg(
            short = 'H',
            long,
            help = "Maximum height in pixels",
            long_help = "Resize the image to a maximum height while preserving aspect ratio, \
                         applied after the width constraint. 0 means unbounded."
        )]
        max_height: Option<u32>,

        #[arg(
            short = 'f',
            long,
            help = "Output format (jpeg, png, webp, gif, avif)",
            long_help = "Force the output format regardless of the output file extension. \
                         If not specified, the source format is kept."
        )]
        format: Option<String>,

        #[arg(
            long,
            help = "Flatten transparency over a white background",
            long_help = "Disable transparency preservation: transparent regions are composited over \
                         opaque white instead of being kept."
        )]
        no_transparency: bool,
    },

    #[command(
        about = "Compress multiple images in parallel",
        long_about = "Process multiple images over a bounded worker pool. \
                      Supports directory traversal, glob patterns, and recursive processing. \
                      At most 100 files are accepted per invocation."
    )]
    Batch {
        #[arg(
            help = "Input directory, file, or glob pattern",
            long_help = "Input can be a directory path, a single file, or a glob expression. \
                         Examples: './images', '*.jpg', '/path/to/images/*.png'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            help = "Compression quality fraction (0-1, default: 0.8)",
            long_help = "Compression quality applied to all images. \
                         Same quality rules as single compress apply."
        )]
        quality: Option<f32>,

        #[arg(
            short = 'w',
            long,
            help = "Maximum width in pixels",
            long_help = "Resize all images to a maximum width while preserving aspect ratio."
        )]
        max_width: Option<u32>,

        #[arg(
            short = 'H',
            long,
            help = "Maximum height in pixels",
            long_help = "Resize all images to a maximum height while preserving aspect ratio."
        )]
        max_height: Option<u32>,

        #[arg(
            short = 'f',
            long,
            help = "Output format (jpeg, png, webp, gif, avif)",
            long_help = "Convert all images to the specified format. \
                         If not specified, each image keeps its original format."
        )]
        format: Option<String>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel workers (default: auto, at most 8)",
            long_help = "Worker count for parallel batch processing. \
                         If not specified, derived from CPU count, batch size, and available memory."
        )]
        workers: Option<usize>,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively",
            long_help = "Recursively process all subdirectories when input is a directory."
        )]
        recursive: bool,
    },

    #[command(
        about = "Predict compressed sizes without encoding",
        long_about = "Estimate the post-compression size of images from their dimensions, byte size, \
                      and format, without running an encoder. Estimates are advisory and clamped to \
                      10-95% of the original size; vector images report their original size."
    )]
    Estimate {
        #[arg(help = "Input directory, file, or glob pattern")]
        input: String,

        #[arg(
            short = 'q',
            long,
            help = "Quality fraction to model (0-1, default: 0.8)"
        )]
        quality: Option<f32>,

        #[arg(short = 'r', long, help = "Process subdirectories recursively")]
        recursive: bool,
    },
}

/// Assemble and validate the engine configuration from CLI arguments.
pub fn build_config(
    quality: Option<f32>,
    format: Option<&str>,
    output: Option<&Path>,
    max_width: Option<u32>,
    max_height: Option<u32>,
    preserve_transparency: bool,
    workers: Option<usize>,
) -> Result<CompressionConfig> {
    let config = CompressionConfig {
        quality: quality.unwrap_or(DEFAULT_QUALITY),
        output_format: resolve_format_override(output, format)?,
        max_width,
        max_height,
        preserve_transparency,
        workers,
    };
    config.validate()?;
    Ok(config)
}
