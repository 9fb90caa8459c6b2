/// File-facing command implementations behind the CLI.
///
/// These wrap the in-memory engine with disk I/O, progress rendering, and
/// the summaries the terminal user sees.
use crate::batch::BatchEntry;
use crate::config::CompressionConfig;
use crate::constants::{MAX_BATCH_FILES, PROGRESS_SPINNER_TEMPLATE};
use crate::engine::{Compressor, SourceImage};
use crate::error::{CompressionError, Result};
use crate::estimate;
use crate::formats::ImageType;
use crate::utils::{collect_image_files, format_file_size};
use crate::{error, info, verbose, warn};
use image::ImageReader;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Compress a single file. With no explicit output the result lands next to
/// the input under the derived `-compressed` name.
pub fn compress_file(
    input: PathBuf,
    output: Option<PathBuf>,
    config: CompressionConfig,
) -> Result<()> {
    info!("🗜️  Compressing image: {:?}", input);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(PROGRESS_SPINNER_TEMPLATE)
            .expect("valid spinner template"),
    );
    pb.set_message("Loading image...");

    let source = SourceImage::from_path(&input)?;
    let compressor = Compressor::new(config)?;

    pb.set_message("Compressing...");
    let result = compressor.compress(&source)?;
    pb.finish_with_message("✅ Compression complete");

    let output_path = output.unwrap_or_else(|| input.with_file_name(&result.output_name));

    if result.format == ImageType::Svg && output_path == input {
        info!("⚠️  Vector image passed through unchanged, nothing to write");
        return Ok(());
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    fs::write(&output_path, &result.bytes)?;

    info!("📁 Output: {:?}", output_path);
    if let (Some(w), Some(h)) = (result.width, result.height) {
        info!(
            "📊 Original size: {} ({}x{})",
            format_file_size(result.original_size),
            w,
            h
        );
    } else {
        info!("📊 Original size: {}", format_file_size(result.original_size));
    }
    info!("📈 Compressed size: {}", format_file_size(result.compressed_size));
    verbose!(
        "Quality {:.2}, output format {}",
        result.quality_used,
        result.format
    );

    let savings = result.savings_percent();
    if savings > 0.0 {
        info!("✅ Successfully reduced file size by {:.1}%", savings);
    } else if savings == 0.0 {
        info!("⚠️  File size unchanged");
    } else {
        info!("⚠️  File size increased by {:.1}%", savings.abs());
    }

    Ok(())
}

/// Compress every image under `input` (file, directory, or glob pattern)
/// into `output_dir`.
pub fn batch_compress_files(
    input: String,
    output_dir: PathBuf,
    config: CompressionConfig,
    recursive: bool,
) -> Result<()> {
    info!("🚀 Starting batch compression...");
    info!("📁 Input: {}", input);
    info!("📁 Output: {:?}", output_dir);

    let start_time = Instant::now();

    let files = match collect_image_files(&input, recursive) {
        Ok(files) => files,
        Err(CompressionError::NoImageFilesFound(_)) => {
            warn!("No image files found in the input path");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if files.len() > MAX_BATCH_FILES {
        return Err(CompressionError::BatchFileLimitExceeded(
            files.len(),
            MAX_BATCH_FILES,
        ));
    }

    info!("📊 Found {} image files to process", files.len());

    let mut sources = Vec::with_capacity(files.len());
    let mut read_failures = 0usize;
    for path in &files {
        match SourceImage::from_path(path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                error!("Failed to read {:?}: {}", path, e);
                read_failures += 1;
            }
        }
    }

    if sources.is_empty() {
        warn!("No readable image files left to process");
        return Ok(());
    }

    fs::create_dir_all(&output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output_dir.clone()))?;

    let compressor = Compressor::new(config)?;

    let progress = ProgressBar::new(sources.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    let on_progress = |_fraction: f64, entry: &BatchEntry| {
        if let BatchEntry::Failed { name, error } = entry {
            error!("Failed to process {}: {}", name, error);
        }
        progress.inc(1);
    };

    let entries = compressor.compress_batch(&sources, Some(&on_progress))?;
    progress.finish_with_message("✅ Batch compression complete");

    let mut total_before = 0u64;
    let mut total_after = 0u64;
    let mut written = 0usize;
    for entry in &entries {
        if let Some(result) = entry.result() {
            fs::write(output_dir.join(&result.output_name), &result.bytes)?;
            total_before += result.original_size;
            total_after += result.compressed_size;
            written += 1;
        }
    }

    let failed = entries.iter().filter(|e| e.is_failed()).count() + read_failures;
    let savings = crate::utils::savings_percent(total_before, total_after);
    let elapsed = start_time.elapsed();

    info!("\n📊 Batch Compression Summary:");
    info!("  📁 Total files processed: {}", written);
    info!("  📊 Total original size: {}", format_file_size(total_before));
    info!("  📊 Total compressed size: {}", format_file_size(total_after));
    info!("  🎯 Overall compression ratio: {:.1}%", savings);
    info!("  ⏱️  Total time: {:?}", elapsed);
    info!(
        "  ⚡ Average speed: {:.2} files/second",
        written as f64 / elapsed.as_secs_f64()
    );
    if failed > 0 {
        info!("  ⚠️  Failed files: {}", failed);
    }

    Ok(())
}

/// Predict compressed sizes for every image under `input` without encoding
/// anything. Dimensions come from a header probe, never a full decode.
pub fn estimate_files(input: String, config: CompressionConfig, recursive: bool) -> Result<()> {
    config.validate()?;

    let files = match collect_image_files(&input, recursive) {
        Ok(files) => files,
        Err(CompressionError::NoImageFilesFound(_)) => {
            warn!("No image files found in the input path");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    info!(
        "🔮 Estimating compressed sizes at quality {:.2} for {} files",
        config.quality,
        files.len()
    );

    let mut total_original = 0u64;
    let mut total_estimated = 0u64;

    for path in &files {
        let size = fs::metadata(path)?.len();
        let Some(image_type) = ImageType::from_path(path) else {
            verbose!("Skipping {:?}: unrecognized extension", path);
            continue;
        };

        if image_type.is_vector() {
            info!("  📄 {:?}: {} — cannot compress (vector graphics)", path, format_file_size(size));
            total_original += size;
            total_estimated += size;
            continue;
        }

        let (width, height) = match ImageReader::open(path)
            .map_err(CompressionError::Read)
            .and_then(|r| r.with_guessed_format().map_err(CompressionError::Read))
            .and_then(|r| r.into_dimensions().map_err(CompressionError::Decode))
        {
            Ok(dims) => dims,
            Err(e) => {
                warn!("Could not read dimensions of {:?}: {}", path, e);
                continue;
            }
        };

        let prediction = estimate::estimate(size, width, height, image_type, config.quality);
        total_original += size;
        total_estimated += prediction.estimated_size;

        info!(
            "  📄 {:?}: {}x{}, {} → ~{} (saves {:.1}%)",
            path,
            width,
            height,
            format_file_size(size),
            format_file_size(prediction.estimated_size),
            prediction.savings_percent()
        );
    }

    if total_original > 0 {
        info!(
            "🎯 Predicted total: {} → ~{} ({:.1}% saved)",
            format_file_size(total_original),
            format_file_size(total_estimated),
            crate::utils::savings_percent(total_original, total_estimated)
        );
    }

    Ok(())
}
