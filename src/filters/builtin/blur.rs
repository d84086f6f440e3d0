//! Blur step applied after the per-pixel pass: Gaussian and box blur.
//!
//! The blur radius comes from the `blur` parameter, rounded to the nearest
//! integer. A radius of 0 skips the step entirely.

use crate::core::error::{FilterError, FilterResult};
use crate::core::metadata::{Category, FilterMetadata, UiHint};
use crate::core::params::FilterKind;
use crate::core::types::PixelBuffer;
use crate::filters::registry::FilterRegistry;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Register the blur parameter.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(
        FilterMetadata::builder(FilterKind::Blur, "Blur")
            .description("Blur radius in pixels, applied after color filtering")
            .category(Category::Raster)
            .range(0.0, 20.0)
            .ui_hint(UiHint::SpinBox)
            .build(),
    );
}

/// Round a blur parameter to a radius: nearest integer, halves rounding up,
/// negative and NaN values giving 0.
pub fn blur_radius(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded > 0.0 {
        rounded as u32
    } else {
        0
    }
}

/// A blur transform that mutates a pixel buffer in place.
pub trait BlurStep: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Blur `buffer` with the given radius. Radius 0 must leave it untouched.
    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) -> FilterResult<()>;
}

/// Gaussian blur with `sigma = radius / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianBlur;

impl BlurStep for GaussianBlur {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) -> FilterResult<()> {
        if radius == 0 {
            return Ok(());
        }
        let sigma = radius as f32 / 2.0;
        let rgba = buffer.clone().into_rgba_image();
        let blurred = imageproc::filter::gaussian_blur_f32(&rgba, sigma);
        write_back(buffer, blurred.as_raw())
    }
}

/// Separable box blur over a `(2 * radius + 1)` window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxBlur;

impl BlurStep for BoxBlur {
    fn name(&self) -> &'static str {
        "box"
    }

    fn blur(&self, buffer: &mut PixelBuffer, radius: u32) -> FilterResult<()> {
        if radius == 0 {
            return Ok(());
        }
        let kernel_size = (2 * radius + 1) as usize;
        let kernel = vec![1.0 / kernel_size as f32; kernel_size];

        let rgba = buffer.clone().into_rgba_image();
        let blurred = imageproc::filter::separable_filter(&rgba, &kernel, &kernel);
        write_back(buffer, blurred.as_raw())
    }
}

fn write_back(buffer: &mut PixelBuffer, blurred: &[u8]) -> FilterResult<()> {
    let target = buffer.as_bytes_mut();
    if target.len() != blurred.len() {
        return Err(FilterError::invalid_input(format!(
            "blur returned {} bytes for a {} byte buffer",
            blurred.len(),
            target.len()
        )));
    }
    target.copy_from_slice(blurred);
    Ok(())
}

/// Selectable blur implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurKind {
    /// [`GaussianBlur`]
    #[default]
    Gaussian,
    /// [`BoxBlur`]
    Box,
}

impl BlurKind {
    /// Instantiate the blur step.
    pub fn step(&self) -> Box<dyn BlurStep> {
        match self {
            BlurKind::Gaussian => Box::new(GaussianBlur),
            BlurKind::Box => Box::new(BoxBlur),
        }
    }
}

impl FromStr for BlurKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(BlurKind::Gaussian),
            "box" => Ok(BlurKind::Box),
            other => Err(FilterError::Config(format!(
                "unknown blur kind '{}' (expected 'gaussian' or 'box')",
                other
            ))),
        }
    }
}
