/// In-memory single-image compression pipeline.
///
/// The [`Compressor`] takes a [`SourceImage`] (raw bytes plus declared MIME
/// type and name), decodes it, optionally resizes it preserving aspect
/// ratio, re-encodes it at the configured quality/format, and reports size
/// and ratio metadata in a [`CompressionResult`]. Vector (SVG) sources pass
/// through untouched.
use crate::config::{CompressionConfig, ConfigUpdate};
use crate::constants::{
    AVIF_ENCODE_SPEED, HIGH_DEFLATE_QUALITY_THRESHOLD, LIBDEFLATER_HIGH_LEVEL,
    LIBDEFLATER_LOW_LEVEL, MAX_PIXEL_DIMENSION, MAX_SOURCE_BYTES, ZOPFLI_ITERATIONS,
    ZOPFLI_QUALITY_THRESHOLD,
};
use crate::error::{CompressionError, Result};
use crate::formats::{ImageType, OutputFormat};
use crate::utils;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, Rgba, RgbaImage};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;
use std::path::Path;

/// An image handed to the engine: raw bytes, the declared MIME type, and the
/// original file name. The engine never mutates it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        SourceImage {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a source from disk, inferring the MIME type from the extension.
    ///
    /// The size cap is enforced before the bytes are read so an oversized
    /// file never reaches memory.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let file_size = std::fs::metadata(path)?.len();
        if file_size > MAX_SOURCE_BYTES {
            return Err(CompressionError::SourceTooLarge(file_size, MAX_SOURCE_BYTES));
        }

        let content_type = ImageType::from_path(path)
            .map(|ty| ty.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let bytes = std::fs::read(path)?;

        Ok(SourceImage {
            name,
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the declared type is in the image category at all.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn image_type(&self) -> Option<ImageType> {
        ImageType::from_mime(&self.content_type)
    }
}

/// The outcome of one successful compression.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub output_name: String,
    pub format: ImageType,
    pub original_size: u64,
    pub compressed_size: u64,
    /// `None` for vector pass-through, where nothing was rasterized.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `original_size / compressed_size`; above 1.0 means the file shrank.
    pub compression_ratio: f64,
    pub quality_used: f32,
}

impl CompressionResult {
    pub fn savings_percent(&self) -> f64 {
        utils::savings_percent(self.original_size, self.compressed_size)
    }
}

/// The compression engine. Holds a validated configuration; one instance can
/// compress any number of images and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    pub fn new(config: CompressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Compressor { config })
    }

    /// Pin the batch worker count instead of letting the pool size itself.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = Some(workers);
        self
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Apply a partial configuration change; on validation failure the
    /// previous configuration stays in effect.
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<()> {
        self.config.apply_update(update)
    }

    /// Compress a single image.
    ///
    /// # Errors
    /// * `UnsupportedType` when the declared type is not `image/*`
    /// * `SourceTooLarge` / `DimensionsTooLarge` when a safety limit is hit
    /// * `Decode` when the bytes are not a readable image
    /// * `Encode` / `EmptyEncodeOutput` when re-encoding fails
    pub fn compress(&self, source: &SourceImage) -> Result<CompressionResult> {
        if !source.is_image() {
            return Err(CompressionError::UnsupportedType(
                source.content_type.clone(),
            ));
        }

        let original_size = source.size();
        let source_type = source.image_type();

        // 矢量图不压缩: SVG is returned as-is, name included.
        if let Some(ty) = source_type {
            if ty.is_vector() {
                return Ok(CompressionResult {
                    bytes: source.bytes.clone(),
                    output_name: source.name.clone(),
                    format: ty,
                    original_size,
                    compressed_size: original_size,
                    width: None,
                    height: None,
                    compression_ratio: 1.0,
                    quality_used: 1.0,
                });
            }
        }

        if original_size > MAX_SOURCE_BYTES {
            return Err(CompressionError::SourceTooLarge(
                original_size,
                MAX_SOURCE_BYTES,
            ));
        }

        let (img, detected) = decode_image(&source.bytes)?;
        let (width, height) = img.dimensions();
        if width > MAX_PIXEL_DIMENSION || height > MAX_PIXEL_DIMENSION {
            return Err(CompressionError::DimensionsTooLarge(
                width,
                height,
                MAX_PIXEL_DIMENSION,
            ));
        }

        // The declared type drives format decisions; the sniffed container
        // format only backs it up when the MIME type is unrecognized.
        let effective_type = source_type.or_else(|| detected.and_then(image_type_of));
        let output = self
            .config
            .output_format
            .or_else(|| effective_type.and_then(|ty| ty.output_format()))
            .unwrap_or(OutputFormat::Png);

        let (target_w, target_h) = compute_target_dimensions(
            width,
            height,
            self.config.effective_max_width(),
            self.config.effective_max_height(),
        );

        let keep_alpha = effective_type.map(|ty| ty.supports_alpha()).unwrap_or(false)
            && self.config.preserve_transparency
            && output.supports_alpha();

        let mut surface = prepare_surface(&img, keep_alpha);
        if (target_w, target_h) != (width, height) {
            surface = surface.resize_exact(target_w, target_h, FilterType::Lanczos3);
        }

        let encoded = encode_image(&surface, output, self.config.quality)?;
        if encoded.is_empty() {
            return Err(CompressionError::EmptyEncodeOutput);
        }

        let converted = Some(output.image_type()) != effective_type;
        let output_name = utils::derive_output_name(&source.name, converted.then_some(output));

        // A same-format re-encode at unchanged dimensions that would grow the
        // file falls back to the original bytes. Explicit conversions and
        // resizes always keep the encoded output.
        let resized = (target_w, target_h) != (width, height);
        if self.config.output_format.is_none()
            && !converted
            && !resized
            && encoded.len() as u64 >= original_size
        {
            return Ok(CompressionResult {
                bytes: source.bytes.clone(),
                output_name,
                format: output.image_type(),
                original_size,
                compressed_size: original_size,
                width: Some(width),
                height: Some(height),
                compression_ratio: 1.0,
                quality_used: self.config.quality,
            });
        }

        let compressed_size = encoded.len() as u64;
        let compression_ratio = original_size as f64 / compressed_size as f64;

        Ok(CompressionResult {
            bytes: encoded,
            output_name,
            format: output.image_type(),
            original_size,
            compressed_size,
            width: Some(target_w),
            height: Some(target_h),
            compression_ratio,
            quality_used: self.config.quality,
        })
    }

    /// Human-readable byte count, e.g. `"1.50 KB"`.
    pub fn format_bytes(bytes: u64) -> String {
        utils::format_file_size(bytes)
    }

    /// Whether this build carries the codecs the engine needs.
    pub fn is_platform_supported() -> bool {
        let readable = [
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::WebP,
            ImageFormat::Gif,
        ];
        let writable = [
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::WebP,
            ImageFormat::Gif,
            ImageFormat::Avif,
        ];
        readable.iter().all(|f| f.reading_enabled())
            && writable.iter().all(|f| f.writing_enabled())
    }
}

fn decode_image(bytes: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(CompressionError::Read)?;
    let format = reader.format();
    let img = reader.decode().map_err(CompressionError::Decode)?;
    Ok((img, format))
}

fn image_type_of(format: ImageFormat) -> Option<ImageType> {
    match format {
        ImageFormat::Jpeg => Some(ImageType::Jpeg),
        ImageFormat::Png => Some(ImageType::Png),
        ImageFormat::WebP => Some(ImageType::WebP),
        ImageFormat::Gif => Some(ImageType::Gif),
        ImageFormat::Bmp => Some(ImageType::Bmp),
        ImageFormat::Tiff => Some(ImageType::Tiff),
        ImageFormat::Avif => Some(ImageType::Avif),
        _ => None,
    }
}

/// Scale `width × height` to fit the limits, keeping the aspect ratio.
///
/// The width constraint is applied first, then the height constraint on top
/// of that result. Final dimensions are floored and never drop below 1.
pub(crate) fn compute_target_dimensions(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;

    if let Some(mw) = max_width {
        if w > mw as f64 {
            h = (mw as f64 / w) * h;
            w = mw as f64;
        }
    }

    if let Some(mh) = max_height {
        if h > mh as f64 {
            w = (mh as f64 / h) * w;
            h = mh as f64;
        }
    }

    ((w.floor() as u32).max(1), (h.floor() as u32).max(1))
}

/// Build the pixel surface to encode from.
///
/// With `keep_alpha` the image stays RGBA; otherwise it is flattened over
/// opaque white, so transparency never turns into black in an opaque target.
fn prepare_surface(img: &DynamicImage, keep_alpha: bool) -> DynamicImage {
    if keep_alpha {
        return DynamicImage::ImageRgba8(img.to_rgba8());
    }

    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &rgba, 0, 0);
    DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

/// Quality fraction mapped onto the 1..=100 scale the encoders expect.
fn quality_to_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn encode_image(img: &DynamicImage, output: OutputFormat, quality: f32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();

    match output {
        OutputFormat::Jpeg => {
            let rgb = img.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality_to_percent(quality));
            encoder.encode_image(&rgb).map_err(CompressionError::Encode)?;
        }
        OutputFormat::Png => {
            // Fast first pass; oxipng does the real compression work.
            let encoder =
                PngEncoder::new_with_quality(&mut buf, CompressionType::Fast, PngFilterType::Adaptive);
            img.write_with_encoder(encoder)
                .map_err(CompressionError::Encode)?;
            buf = optimize_png(buf, quality)?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buf);
            img.write_with_encoder(encoder)
                .map_err(CompressionError::Encode)?;
        }
        OutputFormat::Gif => {
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif)
                .map_err(CompressionError::Encode)?;
        }
        OutputFormat::Avif => {
            let encoder =
                AvifEncoder::new_with_speed_quality(&mut buf, AVIF_ENCODE_SPEED, quality_to_percent(quality));
            img.write_with_encoder(encoder)
                .map_err(CompressionError::Encode)?;
        }
    }

    Ok(buf)
}

/// 使用 oxipng 进行 PNG 优化, in memory. Higher quality buys more deflate
/// effort, topping out at Zopfli.
fn optimize_png(bytes: Vec<u8>, quality: f32) -> Result<Vec<u8>> {
    let mut options = Options::from_preset(4);
    options.force = true;

    options.deflate = if quality >= ZOPFLI_QUALITY_THRESHOLD {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        }
    } else if quality >= HIGH_DEFLATE_QUALITY_THRESHOLD {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    oxipng::optimize_from_memory(&bytes, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([220, 40, 40, 255])
            } else {
                Rgba([40, 40, 220, 128])
            }
        }))
    }

    fn png_source(name: &str, width: u32, height: u32) -> SourceImage {
        let mut buf = Vec::new();
        checker_image(width, height)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        SourceImage::new(name, "image/png", buf)
    }

    fn jpeg_source(name: &str, width: u32, height: u32) -> SourceImage {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                (x * 7 % 256) as u8,
                (y * 13 % 256) as u8,
                ((x + y) * 3 % 256) as u8,
            ])
        }));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
            .unwrap();
        SourceImage::new(name, "image/jpeg", buf)
    }

    fn default_compressor() -> Compressor {
        Compressor::new(CompressionConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_non_image() {
        let source = SourceImage::new("notes.txt", "text/plain", b"hello".to_vec());
        let result = default_compressor().compress(&source);
        assert!(matches!(result, Err(CompressionError::UnsupportedType(_))));
    }

    #[test]
    fn test_invalid_quality_rejected_at_construction() {
        let result = Compressor::new(CompressionConfig::with_quality(0.0));
        assert!(matches!(result, Err(CompressionError::InvalidQuality(_))));
    }

    #[test]
    fn test_svg_passes_through_unchanged() {
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"/>";
        let source = SourceImage::new("logo.svg", "image/svg+xml", svg.to_vec());
        let result = default_compressor().compress(&source).unwrap();

        assert_eq!(result.bytes, svg.to_vec());
        assert_eq!(result.output_name, "logo.svg");
        assert_eq!(result.compressed_size, result.original_size);
        assert_eq!(result.compression_ratio, 1.0);
        assert_eq!(result.quality_used, 1.0);
        assert_eq!(result.width, None);
        assert_eq!(result.height, None);
        assert_eq!(result.format, ImageType::Svg);
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let source = SourceImage::new("broken.png", "image/png", vec![0x00, 0x01, 0x02, 0x03]);
        let result = default_compressor().compress(&source);
        assert!(matches!(result, Err(CompressionError::Decode(_))));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let source = png_source("wide.png", MAX_PIXEL_DIMENSION + 1, 1);
        let result = default_compressor().compress(&source);
        assert!(matches!(
            result,
            Err(CompressionError::DimensionsTooLarge(_, _, _))
        ));
    }

    #[test]
    fn test_target_dimensions_width_rule_first() {
        assert_eq!(compute_target_dimensions(200, 50, Some(100), None), (100, 25));
        assert_eq!(compute_target_dimensions(50, 200, None, Some(100)), (25, 100));
    }

    #[test]
    fn test_target_dimensions_sequential_rules() {
        // Width rule shrinks to 1000x500, height rule then to 500x250.
        assert_eq!(
            compute_target_dimensions(2000, 1000, Some(1000), Some(250)),
            (500, 250)
        );
    }

    #[test]
    fn test_target_dimensions_no_upscale() {
        assert_eq!(compute_target_dimensions(100, 80, Some(200), Some(200)), (100, 80));
    }

    #[test]
    fn test_target_dimensions_floor_and_minimum() {
        // (50/99) * 33 = 16.66.. floors to 16.
        assert_eq!(compute_target_dimensions(99, 33, Some(50), None), (50, 16));
        // An extreme aspect ratio floors to zero and clamps to 1.
        assert_eq!(compute_target_dimensions(10_000, 1, Some(100), None), (100, 1));
    }

    #[test]
    fn test_compress_resizes_with_aspect_ratio() {
        let mut config = CompressionConfig::default();
        config.max_width = Some(100);
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&png_source("wide.png", 200, 50)).unwrap();
        assert_eq!(result.width, Some(100));
        assert_eq!(result.height, Some(25));
        assert!(result.compressed_size >= 1);
        assert!(result.compression_ratio.is_finite());
    }

    #[test]
    fn test_zero_max_width_is_unbounded() {
        let mut config = CompressionConfig::default();
        config.max_width = Some(0);
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&png_source("small.png", 64, 48)).unwrap();
        assert_eq!(result.width, Some(64));
        assert_eq!(result.height, Some(48));
    }

    #[test]
    fn test_output_name_keeps_extension_without_conversion() {
        let result = default_compressor()
            .compress(&png_source("photo.png", 16, 16))
            .unwrap();
        assert_eq!(result.output_name, "photo-compressed.png");
        assert_eq!(result.format, ImageType::Png);
    }

    #[test]
    fn test_conversion_rewrites_extension() {
        let mut config = CompressionConfig::default();
        config.output_format = Some(OutputFormat::Jpeg);
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&png_source("photo.png", 16, 16)).unwrap();
        assert_eq!(result.output_name, "photo-compressed.jpg");
        assert_eq!(result.format, ImageType::Jpeg);

        let (decoded, format) = decode_image(&result.bytes).unwrap();
        assert_eq!(format, Some(ImageFormat::Jpeg));
        assert_eq!(decoded.dimensions(), (16, 16));
    }

    #[test]
    fn test_recompressing_own_output_falls_back_to_original() {
        let compressor = default_compressor();
        let first = compressor.compress(&png_source("a.png", 64, 64)).unwrap();

        let second_source = SourceImage::new("b.png", "image/png", first.bytes.clone());
        let second = compressor.compress(&second_source).unwrap();

        assert_eq!(second.compressed_size, second.original_size);
        assert_eq!(second.compression_ratio, 1.0);
        assert_eq!(second.bytes, second_source.bytes);
        assert_eq!(second.output_name, "b-compressed.png");
    }

    #[test]
    fn test_explicit_conversion_keeps_encoded_output_even_if_larger() {
        // A tiny JPEG converted to lossless WebP usually grows; the encoded
        // bytes must still be returned because the conversion was requested.
        let mut config = CompressionConfig::default();
        config.output_format = Some(OutputFormat::WebP);
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&jpeg_source("tiny.jpg", 32, 32)).unwrap();
        let (_, format) = decode_image(&result.bytes).unwrap();
        assert_eq!(format, Some(ImageFormat::WebP));
        assert_eq!(result.compressed_size, result.bytes.len() as u64);
    }

    #[test]
    fn test_lower_quality_makes_smaller_jpegs() {
        let source = jpeg_source("photo.jpg", 96, 96);

        let low = Compressor::new(CompressionConfig::with_quality(0.2))
            .unwrap()
            .compress(&source)
            .unwrap();
        let high = Compressor::new(CompressionConfig::with_quality(0.95))
            .unwrap()
            .compress(&source)
            .unwrap();

        assert!(low.compressed_size < high.compressed_size);
        assert_eq!(low.quality_used, 0.2);
        assert_eq!(high.quality_used, 0.95);
    }

    #[test]
    fn test_transparency_preserved_for_png() {
        let result = default_compressor()
            .compress(&png_source("alpha.png", 8, 8))
            .unwrap();

        let (decoded, _) = decode_image(&result.bytes).unwrap();
        let rgba = decoded.to_rgba8();
        // (1,0) sits on the semi-transparent half of the checker.
        assert_eq!(rgba.get_pixel(1, 0).0[3], 128);
    }

    #[test]
    fn test_transparency_flattened_over_white_when_disabled() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        let source = SourceImage::new("clear.png", "image/png", buf);

        let mut config = CompressionConfig::default();
        config.preserve_transparency = false;
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&source).unwrap();
        let (decoded, _) = decode_image(&result.bytes).unwrap();
        let rgba = decoded.to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_transparent_source_to_jpeg_is_white_not_black() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        let source = SourceImage::new("clear.png", "image/png", buf);

        let mut config = CompressionConfig::default();
        config.output_format = Some(OutputFormat::Jpeg);
        let compressor = Compressor::new(config).unwrap();

        let result = compressor.compress(&source).unwrap();
        let (decoded, _) = decode_image(&result.bytes).unwrap();
        let pixel = decoded.to_rgba8().get_pixel(4, 4).0;
        // JPEG is lossy; the flattened background must stay near white.
        assert!(pixel[0] > 240 && pixel[1] > 240 && pixel[2] > 240);
    }

    #[test]
    fn test_source_image_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        let mut buf = Vec::new();
        checker_image(4, 4)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, &buf).unwrap();

        let source = SourceImage::from_path(&path).unwrap();
        assert_eq!(source.name, "pic.png");
        assert_eq!(source.content_type, "image/png");
        assert_eq!(source.bytes, buf);

        let missing = SourceImage::from_path(Path::new("missing.png"));
        assert!(matches!(missing, Err(CompressionError::FileNotFound(_))));
    }

    #[test]
    fn test_quality_to_percent() {
        assert_eq!(quality_to_percent(0.8), 80);
        assert_eq!(quality_to_percent(1.0), 100);
        assert_eq!(quality_to_percent(0.004), 1);
        assert_eq!(quality_to_percent(0.5), 50);
    }

    #[test]
    fn test_platform_support_and_format_bytes() {
        assert!(Compressor::is_platform_supported());
        assert_eq!(Compressor::format_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_update_config_roundtrip() {
        let mut compressor = default_compressor();
        compressor
            .update_config(&ConfigUpdate::quality(0.5))
            .unwrap();
        assert_eq!(compressor.config().quality, 0.5);

        let bad = compressor.update_config(&ConfigUpdate::quality(2.0));
        assert!(bad.is_err());
        assert_eq!(compressor.config().quality, 0.5);
    }
}
