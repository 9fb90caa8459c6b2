/// Compression configuration and partial-update merging.
use crate::constants::DEFAULT_QUALITY;
use crate::error::{CompressionError, Result};
use crate::formats::OutputFormat;

/// Settings for a compression run.
///
/// `quality` is a fraction in `(0.0, 1.0]`. `output_format: None` keeps each
/// source's own format. A missing or zero dimension limit means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionConfig {
    pub quality: f32,
    pub output_format: Option<OutputFormat>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub preserve_transparency: bool,
    /// Explicit batch worker count; `None` lets the pool size itself.
    pub workers: Option<usize>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        CompressionConfig {
            quality: DEFAULT_QUALITY,
            output_format: None,
            max_width: None,
            max_height: None,
            preserve_transparency: true,
            workers: None,
        }
    }
}

impl CompressionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(quality: f32) -> Self {
        CompressionConfig {
            quality,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !self.quality.is_finite() || self.quality <= 0.0 || self.quality > 1.0 {
            return Err(CompressionError::InvalidQuality(self.quality));
        }
        Ok(())
    }

    /// Width limit with the zero sentinel normalized away.
    pub fn effective_max_width(&self) -> Option<u32> {
        self.max_width.filter(|&w| w > 0)
    }

    /// Height limit with the zero sentinel normalized away.
    pub fn effective_max_height(&self) -> Option<u32> {
        self.max_height.filter(|&h| h > 0)
    }

    /// Apply a partial update, validating before committing. On error the
    /// existing configuration is left untouched.
    pub fn apply_update(&mut self, update: &ConfigUpdate) -> Result<()> {
        let merged = self.merged(update)?;
        *self = merged;
        Ok(())
    }

    /// Merge a partial update into a copy and validate the result.
    pub fn merged(&self, update: &ConfigUpdate) -> Result<CompressionConfig> {
        let mut next = self.clone();
        if let Some(quality) = update.quality {
            next.quality = quality;
        }
        if let Some(format) = update.output_format {
            next.output_format = format;
        }
        if let Some(width) = update.max_width {
            next.max_width = width;
        }
        if let Some(height) = update.max_height {
            next.max_height = height;
        }
        if let Some(preserve) = update.preserve_transparency {
            next.preserve_transparency = preserve;
        }
        if let Some(workers) = update.workers {
            next.workers = workers;
        }
        next.validate()?;
        Ok(next)
    }
}

/// A partial configuration change.
///
/// Each field distinguishes "leave as-is" (`None`) from "set to this value"
/// (`Some(..)`); for the optional limits the inner `Option` carries the new
/// value, so `Some(None)` clears a limit while `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub quality: Option<f32>,
    pub output_format: Option<Option<OutputFormat>>,
    pub max_width: Option<Option<u32>>,
    pub max_height: Option<Option<u32>>,
    pub preserve_transparency: Option<bool>,
    pub workers: Option<Option<usize>>,
}

impl ConfigUpdate {
    pub fn quality(quality: f32) -> Self {
        ConfigUpdate {
            quality: Some(quality),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
