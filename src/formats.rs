/// Image format classification and type-safe output format handling.
///
/// `ImageType` classifies a source by its declared MIME type (the way a
/// browser labels an uploaded file); `OutputFormat` is the narrower set of
/// formats the engine can re-encode into.
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A source image format, keyed by MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    Tiff,
    Avif,
    /// Vector content; passed through untouched, never rasterized.
    Svg,
}

impl ImageType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageType::Jpeg),
            "image/png" => Some(ImageType::Png),
            "image/webp" => Some(ImageType::WebP),
            "image/gif" => Some(ImageType::Gif),
            "image/bmp" => Some(ImageType::Bmp),
            "image/tiff" => Some(ImageType::Tiff),
            "image/avif" => Some(ImageType::Avif),
            "image/svg+xml" => Some(ImageType::Svg),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageType::Jpeg),
            "png" => Some(ImageType::Png),
            "webp" => Some(ImageType::WebP),
            "gif" => Some(ImageType::Gif),
            "bmp" => Some(ImageType::Bmp),
            "tif" | "tiff" => Some(ImageType::Tiff),
            "avif" => Some(ImageType::Avif),
            "svg" => Some(ImageType::Svg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::WebP => "image/webp",
            ImageType::Gif => "image/gif",
            ImageType::Bmp => "image/bmp",
            ImageType::Tiff => "image/tiff",
            ImageType::Avif => "image/avif",
            ImageType::Svg => "image/svg+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpg",
            ImageType::Png => "png",
            ImageType::WebP => "webp",
            ImageType::Gif => "gif",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
            ImageType::Avif => "avif",
            ImageType::Svg => "svg",
        }
    }

    /// Vector content is never decoded or resized by the engine.
    pub fn is_vector(&self) -> bool {
        matches!(self, ImageType::Svg)
    }

    /// Whether the format can carry an alpha channel through a re-encode.
    pub fn supports_alpha(&self) -> bool {
        matches!(
            self,
            ImageType::Png | ImageType::WebP | ImageType::Gif | ImageType::Avif
        )
    }

    /// The encode target that keeps this source format, if one exists.
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self {
            ImageType::Jpeg => Some(OutputFormat::Jpeg),
            ImageType::Png => Some(OutputFormat::Png),
            ImageType::WebP => Some(OutputFormat::WebP),
            ImageType::Gif => Some(OutputFormat::Gif),
            ImageType::Avif => Some(OutputFormat::Avif),
            ImageType::Bmp | ImageType::Tiff | ImageType::Svg => None,
        }
    }

    /// Conservative decoded-memory multiplier over the on-disk byte size,
    /// used when sizing the batch worker pool.
    pub fn decode_memory_multiplier(&self) -> f64 {
        match self {
            ImageType::Jpeg => 4.0,
            ImageType::Png => 3.0,
            ImageType::WebP => 3.5,
            ImageType::Gif => 2.0,
            ImageType::Avif => 4.0,
            ImageType::Bmp | ImageType::Tiff => 1.2,
            ImageType::Svg => 1.0,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageType::Jpeg => "JPEG",
            ImageType::Png => "PNG",
            ImageType::WebP => "WebP",
            ImageType::Gif => "GIF",
            ImageType::Bmp => "BMP",
            ImageType::Tiff => "TIFF",
            ImageType::Avif => "AVIF",
            ImageType::Svg => "SVG",
        };
        write!(f, "{}", name)
    }
}

/// Supported re-encode targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG with lossy quality-controlled compression
    Jpeg,
    /// PNG with lossless compression plus oxipng optimization
    Png,
    /// WebP (lossless encode)
    WebP,
    /// GIF
    Gif,
    /// AVIF with lossy quality-controlled compression
    Avif,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        self.image_type().extension()
    }

    pub fn mime_type(&self) -> &'static str {
        self.image_type().mime_type()
    }

    /// Convert to the image crate's `ImageFormat`.
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Avif => ImageFormat::Avif,
        }
    }

    pub fn image_type(&self) -> ImageType {
        match self {
            OutputFormat::Jpeg => ImageType::Jpeg,
            OutputFormat::Png => ImageType::Png,
            OutputFormat::WebP => ImageType::WebP,
            OutputFormat::Gif => ImageType::Gif,
            OutputFormat::Avif => ImageType::Avif,
        }
    }

    pub fn supports_alpha(&self) -> bool {
        self.image_type().supports_alpha()
    }

    pub fn all_formats() -> Vec<OutputFormat> {
        vec![
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::WebP,
            OutputFormat::Gif,
            OutputFormat::Avif,
        ]
    }

    /// Format names accepted on the command line.
    pub fn format_names() -> Vec<&'static str> {
        vec!["jpeg", "png", "webp", "gif", "avif"]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.image_type())
    }
}

impl FromStr for OutputFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "gif" => Ok(OutputFormat::Gif),
            "avif" => Ok(OutputFormat::Avif),
            _ => Err(CompressionError::UnsupportedFormat(format!(
                "{} (expected one of: {})",
                s,
                OutputFormat::format_names().join(", ")
            ))),
        }
    }
}

/// Resolve the output format for a CLI invocation: an explicit `--format`
/// flag wins, then a recognized extension on the output path; otherwise the
/// source format is kept (`None`).
pub fn resolve_format_override(
    output_path: Option<&Path>,
    format_flag: Option<&str>,
) -> Result<Option<OutputFormat>> {
    if let Some(fmt_str) = format_flag {
        return OutputFormat::from_str(fmt_str).map(Some);
    }

    if let Some(ext) = output_path
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
    {
        if let Ok(format) = OutputFormat::from_str(ext) {
            return Ok(Some(format));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_type_from_mime() {
        assert_eq!(ImageType::from_mime("image/jpeg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_mime("image/PNG"), Some(ImageType::Png));
        assert_eq!(ImageType::from_mime("image/webp"), Some(ImageType::WebP));
        assert_eq!(ImageType::from_mime("image/svg+xml"), Some(ImageType::Svg));
        assert_eq!(ImageType::from_mime("text/plain"), None);
        assert_eq!(ImageType::from_mime(""), None);
    }

    #[test]
    fn test_image_type_from_extension() {
        assert_eq!(ImageType::from_extension("jpg"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_extension("JPEG"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_extension("svg"), Some(ImageType::Svg));
        assert_eq!(ImageType::from_extension("tif"), Some(ImageType::Tiff));
        assert_eq!(ImageType::from_extension("txt"), None);
    }

    #[test]
    fn test_image_type_from_path() {
        assert_eq!(
            ImageType::from_path(Path::new("photo.png")),
            Some(ImageType::Png)
        );
        assert_eq!(ImageType::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_mime_extension_round_trip() {
        for ty in [
            ImageType::Jpeg,
            ImageType::Png,
            ImageType::WebP,
            ImageType::Gif,
            ImageType::Bmp,
            ImageType::Tiff,
            ImageType::Avif,
            ImageType::Svg,
        ] {
            assert_eq!(ImageType::from_mime(ty.mime_type()), Some(ty));
            assert_eq!(ImageType::from_extension(ty.extension()), Some(ty));
        }
    }

    #[test]
    fn test_vector_and_alpha_predicates() {
        assert!(ImageType::Svg.is_vector());
        assert!(!ImageType::Png.is_vector());

        assert!(ImageType::Png.supports_alpha());
        assert!(ImageType::WebP.supports_alpha());
        assert!(ImageType::Gif.supports_alpha());
        assert!(ImageType::Avif.supports_alpha());
        assert!(!ImageType::Jpeg.supports_alpha());
        assert!(!ImageType::Svg.supports_alpha());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_str("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_str("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_str("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_str("gif").unwrap(), OutputFormat::Gif);
        assert_eq!(OutputFormat::from_str("avif").unwrap(), OutputFormat::Avif);

        assert!(OutputFormat::from_str("svg").is_err());
        assert!(OutputFormat::from_str("unsupported").is_err());
    }

    #[test]
    fn test_output_format_maps() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::WebP.to_image_format(), ImageFormat::WebP);
        assert_eq!(OutputFormat::Avif.image_type(), ImageType::Avif);
        assert!(!OutputFormat::Jpeg.supports_alpha());
        assert!(OutputFormat::Png.supports_alpha());
    }

    #[test]
    fn test_resolve_format_override_flag_wins() {
        let path = Path::new("out.png");
        let resolved = resolve_format_override(Some(path), Some("webp")).unwrap();
        assert_eq!(resolved, Some(OutputFormat::WebP));
    }

    #[test]
    fn test_resolve_format_override_from_extension() {
        let path = Path::new("out.jpg");
        let resolved = resolve_format_override(Some(path), None).unwrap();
        assert_eq!(resolved, Some(OutputFormat::Jpeg));
    }

    #[test]
    fn test_resolve_format_override_keeps_source() {
        assert_eq!(resolve_format_override(None, None).unwrap(), None);

        // Unrecognized extension falls back to keeping the source format.
        let path = Path::new("out.xyz");
        assert_eq!(resolve_format_override(Some(path), None).unwrap(), None);
    }

    #[test]
    fn test_resolve_format_override_bad_flag() {
        let result = resolve_format_override(None, Some("heic"));
        assert!(matches!(
            result,
            Err(CompressionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", OutputFormat::Jpeg), "JPEG");
        assert_eq!(format!("{}", ImageType::Svg), "SVG");
        assert_eq!(format!("{}", OutputFormat::WebP), "WebP");
    }
}
