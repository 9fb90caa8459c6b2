/// Pre-compression size estimation.
///
/// Predicts how large an image would be after compression without running an
/// encoder. The per-format factor curves are empirical; the result is
/// advisory and never consulted to skip a real compression.
use crate::constants::{
    ESTIMATE_CEIL_RATIO, ESTIMATE_FLOOR_RATIO, JPEG_FACTOR_EXPONENT, PNG_FACTOR_BASE,
    PNG_FACTOR_RANGE, WEBP_FACTOR_EXPONENT,
};
use crate::formats::ImageType;

/// A size prediction for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeEstimate {
    pub original_size: u64,
    pub width: u32,
    pub height: u32,
    pub format: ImageType,
    pub compression_factor: f64,
    pub estimated_size: u64,
}

impl SizeEstimate {
    /// Predicted space saving as a percentage of the original size.
    pub fn savings_percent(&self) -> f64 {
        crate::utils::savings_percent(self.original_size, self.estimated_size)
    }
}

/// Expected compressed/original size factor for a format at a given quality.
///
/// JPEG and WebP compress aggressively (power curves); PNG is
/// lossless-oriented and bottoms out around 70% of the original.
pub fn compression_factor(format: ImageType, quality: f32) -> f64 {
    let q = quality as f64;
    match format {
        ImageType::Jpeg => q.powf(JPEG_FACTOR_EXPONENT),
        ImageType::Png => PNG_FACTOR_BASE + q * PNG_FACTOR_RANGE,
        ImageType::WebP => q.powf(WEBP_FACTOR_EXPONENT),
        ImageType::Svg => 1.0,
        _ => q,
    }
}

/// Predict the compressed byte size of an image.
///
/// Vector input is returned at its original size. For raster input the
/// source's effective bits-per-pixel is scaled by the format factor and the
/// result clamped to `[10%, 95%]` of the original, so the prediction is
/// never near-zero and always promises at least a small reduction.
pub fn estimate_size(
    original_size: u64,
    width: u32,
    height: u32,
    format: ImageType,
    quality: f32,
) -> u64 {
    if format.is_vector() {
        return original_size;
    }

    let factor = compression_factor(format, quality);
    let size = original_size as f64;
    let pixel_count = width as f64 * height as f64;

    let estimated = if pixel_count > 0.0 {
        let bits_per_pixel = (size * 8.0) / pixel_count;
        let estimated_bits_per_pixel = bits_per_pixel * factor;
        (estimated_bits_per_pixel * pixel_count) / 8.0
    } else {
        size * factor
    };

    let min_size = size * ESTIMATE_FLOOR_RATIO;
    let max_size = size * ESTIMATE_CEIL_RATIO;
    min_size.max(estimated.min(max_size)).round() as u64
}

/// Build the full estimate record for one image.
pub fn estimate(
    original_size: u64,
    width: u32,
    height: u32,
    format: ImageType,
    quality: f32,
) -> SizeEstimate {
    SizeEstimate {
        original_size,
        width,
        height,
        format,
        compression_factor: compression_factor(format, quality),
        estimated_size: estimate_size(original_size, width, height, format, quality),
    }
}
