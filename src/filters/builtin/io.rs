//! Image acquisition and export.
//!
//! Loading decodes any format the `image` crate understands and fits the
//! result into a display region. Export writes PNG files or PNG data URLs.

use crate::core::error::{FilterError, FilterResult};
use crate::core::types::PixelBuffer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;

/// Share of the display region an acquired image may occupy.
pub const REGION_FILL: f64 = 0.9;

/// Prefix of a PNG data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Fit `(width, height)` into 90% of a display region, preserving aspect.
///
/// Only one axis is tested: landscape images shrink when wider than the limit,
/// all others when taller. Results are truncated to whole pixels.
pub fn fit_to_region(width: u32, height: u32, region_width: u32, region_height: u32) -> (u32, u32) {
    let (w, h) = (width as f64, height as f64);
    let max_w = region_width as f64 * REGION_FILL;
    let max_h = region_height as f64 * REGION_FILL;

    let (fit_w, fit_h) = if w > h {
        if w > max_w {
            (max_w, h * max_w / w)
        } else {
            (w, h)
        }
    } else if h > max_h {
        (w * max_h / h, max_h)
    } else {
        (w, h)
    };

    ((fit_w as u32).max(1), (fit_h as u32).max(1))
}

/// Largest sensible border width for an image: a third of the shorter side.
pub fn border_limit(width: u32, height: u32) -> u32 {
    if width > height {
        height / 3
    } else {
        width / 3
    }
}

/// Decode an image file into a pixel buffer, optionally fitted to a region.
pub fn load_image(path: impl AsRef<Path>, region: Option<(u32, u32)>) -> FilterResult<PixelBuffer> {
    let path = path.as_ref();
    let mut rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    if let Some((region_w, region_h)) = region {
        if region_w == 0 || region_h == 0 {
            return Err(FilterError::Config(format!(
                "display region {}x{} has no area",
                region_w, region_h
            )));
        }
        let (fit_w, fit_h) = fit_to_region(width, height, region_w, region_h);
        if (fit_w, fit_h) != (width, height) {
            debug!(
                "fitting {} from {}x{} to {}x{}",
                path.display(),
                width,
                height,
                fit_w,
                fit_h
            );
            rgba = image::imageops::resize(&rgba, fit_w, fit_h, FilterType::Triangle);
        }
    }

    debug!("loaded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    PixelBuffer::from_rgba_image(&rgba)
}

/// Encode a surface as PNG bytes.
pub fn encode_png(surface: &RgbaImage) -> FilterResult<Vec<u8>> {
    let mut bytes = Vec::new();
    surface.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write a surface to `path` as PNG, creating parent directories.
pub fn save_png(surface: &RgbaImage, path: impl AsRef<Path>) -> FilterResult<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !extension.eq_ignore_ascii_case("png") {
        warn!("writing PNG data to {} despite its extension", path.display());
    }
    std::fs::write(path, encode_png(surface)?)?;
    Ok(())
}

/// Write a surface in the format implied by the file extension.
pub fn save_image(surface: &RgbaImage, path: impl AsRef<Path>) -> FilterResult<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => {
            // JPEG has no alpha channel.
            let rgb = image::DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
            rgb.save(path)?;
        }
        Ok(_) => surface.save(path)?,
        Err(_) => save_png(surface, path)?,
    }
    debug!("saved {}", path.display());
    Ok(())
}

/// Encode a surface as a `data:image/png;base64,...` URL.
pub fn to_data_url(surface: &RgbaImage) -> FilterResult<String> {
    let png = encode_png(surface)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
}

fn create_parent_dirs(path: &Path) -> FilterResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 128, 255]))
    }

    #[test]
    fn test_fit_landscape() {
        assert_eq!(fit_to_region(2000, 1000, 1000, 1000), (900, 450));
        assert_eq!(fit_to_region(800, 400, 1000, 1000), (800, 400));
    }

    #[test]
    fn test_fit_portrait_and_square() {
        assert_eq!(fit_to_region(1000, 2000, 1000, 1000), (450, 900));
        assert_eq!(fit_to_region(1000, 1000, 500, 500), (450, 450));
    }

    #[test]
    fn test_fit_tests_single_axis() {
        // Landscape image fits the width limit but not the height limit.
        assert_eq!(fit_to_region(800, 700, 1000, 500), (800, 700));
    }

    #[test]
    fn test_border_limit() {
        assert_eq!(border_limit(300, 90), 30);
        assert_eq!(border_limit(90, 300), 30);
        assert_eq!(border_limit(10, 10), 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let surface = sample(12, 7);

        save_png(&surface, &path).unwrap();
        let loaded = load_image(&path, None).unwrap();

        assert_eq!(loaded.width(), 12);
        assert_eq!(loaded.height(), 7);
        assert_eq!(loaded.as_bytes(), surface.as_raw().as_slice());
    }

    #[test]
    fn test_load_fits_region() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        save_png(&sample(200, 100), &path).unwrap();

        let loaded = load_image(&path, Some((100, 100))).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (90, 45));

        assert!(matches!(
            load_image(&path, Some((0, 100))),
            Err(FilterError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(load_image(dir.path().join("missing.png"), None).is_err());
    }

    #[test]
    fn test_save_image_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save_image(&sample(8, 8), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().width(), 8);
    }

    #[test]
    fn test_data_url() {
        let url = to_data_url(&sample(3, 3)).unwrap();
        assert!(url.starts_with(PNG_DATA_URL_PREFIX));

        let decoded = STANDARD.decode(&url[PNG_DATA_URL_PREFIX.len()..]).unwrap();
        let image = image::load_from_memory(&decoded).unwrap().to_rgba8();
        assert_eq!(image, sample(3, 3));
    }
}
