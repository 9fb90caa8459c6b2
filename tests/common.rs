use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(gradient(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode_image(&img)
        .unwrap();
    buf
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, png_bytes(width, height)).unwrap();
    path
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, jpeg_bytes(width, height)).unwrap();
    path
}

/// PNG with a fully transparent left half and an opaque red right half.
pub fn write_transparent_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    fs::write(&path, buf).unwrap();
    path
}

pub fn create_mixed_directory(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    files.push(write_png(dir, "a.png", 24, 24));
    files.push(write_jpeg(dir, "b.jpg", 32, 24));

    let txt_file = dir.join("notes.txt");
    fs::write(&txt_file, b"not an image").unwrap();
    files.push(txt_file);

    files
}

pub fn create_nested_directory_structure(dir: &Path) -> PathBuf {
    let subdir = dir.join("subdir");
    fs::create_dir(&subdir).unwrap();
    write_png(&subdir, "nested.png", 20, 20);
    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
