/// Shared helpers: size formatting, output naming, file collection.
use crate::constants::COMPRESSED_NAME_SUFFIX;
use crate::error::{CompressionError, Result};
use crate::formats::{ImageType, OutputFormat};
use glob::glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Format a byte count with binary units, e.g. `1536` -> `"1.50 KB"`.
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// Space saved as a percentage of the original size.
pub fn savings_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Derive the output file name from a source name.
///
/// `-compressed` is inserted before the last dot, or appended when the name
/// has none. When `format` converts the image, the extension follows the new
/// format.
pub fn derive_output_name(name: &str, format: Option<OutputFormat>) -> String {
    match name.rfind('.') {
        Some(idx) => {
            let stem = &name[..idx];
            match format {
                Some(f) => format!("{}{}.{}", stem, COMPRESSED_NAME_SUFFIX, f.extension()),
                None => format!("{}{}{}", stem, COMPRESSED_NAME_SUFFIX, &name[idx..]),
            }
        }
        None => match format {
            Some(f) => format!("{}{}.{}", name, COMPRESSED_NAME_SUFFIX, f.extension()),
            None => format!("{}{}", name, COMPRESSED_NAME_SUFFIX),
        },
    }
}

/// Whether a path has a recognized image extension.
pub fn is_image_path(path: &Path) -> bool {
    ImageType::from_path(path).is_some()
}

/// Collect image files from a path or glob pattern.
///
/// A directory yields its image files (recursing when asked), a file yields
/// itself, and anything else is treated as a glob pattern. Results are
/// sorted for stable ordering.
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    let mut files = Vec::new();

    if path.is_dir() {
        if recursive {
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file() && is_image_path(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            for entry in std::fs::read_dir(path)? {
                let entry = entry?;
                let entry_path = entry.path();
                if entry_path.is_file() && is_image_path(&entry_path) {
                    files.push(entry_path);
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        let pattern = glob(input)
            .map_err(|_| CompressionError::NoImageFilesFound(input.to_string()))?;
        for entry in pattern {
            let entry_path = entry.map_err(|e| CompressionError::Read(e.into_error()))?;
            if entry_path.is_file() && is_image_path(&entry_path) {
                files.push(entry_path);
            }
        }
    }

    files.sort();

    if files.is_empty() {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    Ok(files)
}
