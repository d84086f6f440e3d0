//! Core value types that flow through the filter pipeline.
//!
//! - [`PixelBuffer`]: a fixed-size, row-major RGBA8 raster
//! - [`Rgb`] / [`Hsl`]: transient per-pixel triples used by the filter math
//! - [`Color`]: an 8-bit color, used for the derived border color

use crate::core::error::{FilterError, FilterResult};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Convert a floating point channel value to a stored 8-bit channel.
///
/// Matches clamped-byte-array semantics: NaN becomes 0, values are clamped to
/// `[0, 255]` and rounded half to even.
#[inline]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0).round_ties_even() as u8
    }
}

/// A flat RGBA8 pixel buffer of fixed width and height.
///
/// The byte length is always `width * height * 4` and never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking the declared dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> FilterResult<Self> {
        if data.is_empty() {
            return Err(FilterError::invalid_input("pixel buffer is empty"));
        }
        if data.len() % CHANNELS != 0 {
            return Err(FilterError::invalid_input(format!(
                "buffer length {} is not a multiple of {}",
                data.len(),
                CHANNELS
            )));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(FilterError::invalid_input(format!(
                "buffer length {} does not match {}x{} RGBA ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self { width, height, data })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> FilterResult<Self> {
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, data)
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> FilterResult<Self>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes. The length cannot change through this slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGBA value at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let quad = &self.data[offset..offset + CHANNELS];
        Some([quad[0], quad[1], quad[2], quad[3]])
    }

    /// Consume the buffer and return the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copy an `image` crate raster into a pixel buffer.
    pub fn from_rgba_image(image: &RgbaImage) -> FilterResult<Self> {
        Self::new(image.width(), image.height(), image.as_raw().clone())
    }

    /// Convert into an `image` crate raster without copying.
    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        // Length is validated at construction, so the conversion cannot fail.
        RgbaImage::from_raw(width, height, self.data)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

/// An RGB triple in the `[0, 255]` range, unclamped during filter math.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red
    pub r: f64,
    /// Green
    pub g: f64,
    /// Blue
    pub b: f64,
}

impl Rgb {
    /// Create a new triple.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in r, g, b order.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to each channel.
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Clamp and round each channel for storage.
    pub fn to_bytes(self) -> [u8; 3] {
        [to_channel(self.r), to_channel(self.g), to_channel(self.b)]
    }
}

/// An HSL triple, each component nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue, in turns
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Lightness
    pub l: f64,
}

impl Hsl {
    /// Create a new triple.
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Create a new color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB components (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to a lowercase hex string with two zero-padded digits per channel.
    ///
    /// Alpha is omitted when the color is opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Channels as an `image` crate pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_shape_checks() {
        assert!(PixelBuffer::new(2, 1, vec![0; 8]).is_ok());

        let err = PixelBuffer::new(0, 0, Vec::new()).unwrap_err();
        assert!(err.is_input_error());

        let err = PixelBuffer::new(1, 1, vec![0; 7]).unwrap_err();
        assert!(err.to_string().contains("multiple of 4"));

        let err = PixelBuffer::new(2, 2, vec![0; 8]).unwrap_err();
        assert!(err.to_string().contains("2x2"));
    }

    #[test]
    fn test_buffer_access() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.stride(), 12);
        assert_eq!(buffer.pixel(2, 1), Some([2, 1, 7, 255]));
        assert_eq!(buffer.pixel(3, 0), None);

        let image = buffer.clone().into_rgba_image();
        assert_eq!(image.get_pixel(1, 1).0, [1, 1, 7, 255]);
        assert_eq!(PixelBuffer::from_rgba_image(&image).unwrap(), buffer);
    }

    #[test]
    fn test_to_channel() {
        assert_eq!(to_channel(-4.0), 0);
        assert_eq!(to_channel(300.0), 255);
        assert_eq!(to_channel(f64::NAN), 0);
        assert_eq!(to_channel(127.5), 128);
        assert_eq!(to_channel(126.5), 126);
        assert_eq!(to_channel(12.49), 12);
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(Color::rgb(5, 255, 10).to_hex(), "#05ff0a");
        assert_eq!(Color::new(0, 0, 0, 16).to_hex(), "#00000010");
    }
}
