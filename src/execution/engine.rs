//! Pipeline runner.
//!
//! One pass reads every pixel of an input buffer, applies the fixed filter
//! composition and writes a new buffer of the same shape. Rows are processed
//! independently (optionally on the rayon pool); per-row statistics are folded
//! in row order so that sequential and parallel passes agree bit for bit.

use crate::core::colorspace::{hsl_to_rgb, rgb_to_hsl};
use crate::core::error::FilterResult;
use crate::core::params::{FilterKind, FilterParameters, Setting};
use crate::core::types::{to_channel, Color, PixelBuffer, Rgb, CHANNELS};
use crate::execution::stats::AggregateStats;
use crate::filters::builtin::{color, hsl};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Execution options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Whether to process rows on the rayon thread pool.
    pub parallel: bool,
    /// Images with fewer pixels than this run sequentially even when
    /// `parallel` is set.
    pub min_parallel_pixels: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_pixels: 64 * 1024,
        }
    }
}

impl ExecutionOptions {
    /// Create a new options builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the pixel count below which passes stay sequential.
    pub fn with_min_parallel_pixels(mut self, pixels: usize) -> Self {
        self.min_parallel_pixels = pixels;
        self
    }
}

/// The per-pixel filter composition, resolved from a parameter set.
///
/// Order: RGB→HSL, saturate, hue, HSL→RGB, brightness, contrast, grayscale,
/// invert, sepia. Opacity touches alpha only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition {
    /// HSL saturation factor.
    pub saturate: Setting,
    /// Hue rotation in degrees.
    pub hue: Setting,
    /// Brightness factor.
    pub brightness: Setting,
    /// Contrast factor.
    pub contrast: Setting,
    /// Grayscale amount.
    pub grayscale: Setting,
    /// Invert amount.
    pub invert: Setting,
    /// Sepia amount.
    pub sepia: Setting,
    /// Alpha multiplier.
    pub opacity: Setting,
}

impl Composition {
    /// Resolve the settings used by the per-pixel pass.
    pub fn from_params(params: &FilterParameters) -> Self {
        Self {
            saturate: params.setting(FilterKind::Saturate),
            hue: params.setting(FilterKind::Hue),
            brightness: params.setting(FilterKind::Brightness),
            contrast: params.setting(FilterKind::Contrast),
            grayscale: params.setting(FilterKind::Grayscale),
            invert: params.setting(FilterKind::Invert),
            sepia: params.setting(FilterKind::Sepia),
            opacity: params.setting(FilterKind::Opacity),
        }
    }

    /// Run the color filters on one pixel. The result is unclamped.
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        let hsl = rgb_to_hsl(rgb);
        let hsl = hsl::saturate(hsl, self.saturate);
        let hsl = hsl::hue(hsl, self.hue);
        let rgb = hsl_to_rgb(hsl);

        let rgb = color::brightness(rgb, self.brightness);
        let rgb = color::contrast(rgb, self.contrast);
        let rgb = color::grayscale(rgb, self.grayscale);
        let rgb = color::invert(rgb, self.invert);
        color::sepia(rgb, self.sepia)
    }

    /// Alpha to store for a pixel.
    #[inline]
    pub fn apply_alpha(&self, alpha: u8) -> u8 {
        if self.opacity.is_active() {
            to_channel(color::opacity(alpha as f64, self.opacity))
        } else {
            alpha
        }
    }

    fn process_row(&self, src: &[u8], dst: &mut [u8]) -> AggregateStats {
        let mut stats = AggregateStats::new();

        for (input, output) in src.chunks_exact(CHANNELS).zip(dst.chunks_exact_mut(CHANNELS)) {
            let rgb = self.apply(Rgb::new(input[0] as f64, input[1] as f64, input[2] as f64));
            let bytes = rgb.to_bytes();
            output[..3].copy_from_slice(&bytes);
            output[3] = self.apply_alpha(input[3]);
            stats.add(bytes);
        }

        stats
    }
}

/// Apply the color filters in `params` to a single pixel.
pub fn compose_pixel(rgb: Rgb, params: &FilterParameters) -> Rgb {
    Composition::from_params(params).apply(rgb)
}

/// Result of one pipeline pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Filtered pixels, same shape as the input.
    pub buffer: PixelBuffer,
    /// Complement of the mean stored color.
    pub border_color: Color,
    /// Statistics the border color was derived from.
    pub stats: AggregateStats,
    /// Wall time of the pass.
    pub duration: Duration,
}

/// Runs the filter composition over whole buffers.
///
/// The runner holds no state between passes; every call starts from the
/// buffer it is given.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunner {
    options: ExecutionOptions,
}

impl PipelineRunner {
    /// Create a runner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with the given options.
    pub fn with_options(options: ExecutionOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Run a pass over raw RGBA bytes, validating their shape first.
    pub fn run_bytes(
        &self,
        width: u32,
        height: u32,
        data: &[u8],
        params: &FilterParameters,
    ) -> FilterResult<PipelineOutput> {
        let input = PixelBuffer::new(width, height, data.to_vec())?;
        self.run(&input, params)
    }

    /// Run a pass over `input`.
    pub fn run(
        &self,
        input: &PixelBuffer,
        params: &FilterParameters,
    ) -> FilterResult<PipelineOutput> {
        let start = Instant::now();
        let composition = Composition::from_params(params);
        let stride = input.stride();
        let src = input.as_bytes();
        let mut dst = vec![0u8; src.len()];

        let parallel =
            self.options.parallel && input.pixel_count() >= self.options.min_parallel_pixels;
        trace!(
            "pass over {}x{} ({}), active filters: {:?}",
            input.width(),
            input.height(),
            if parallel { "parallel" } else { "sequential" },
            params.active()
        );

        let row_stats: Vec<AggregateStats> = if parallel {
            src.par_chunks(stride)
                .zip(dst.par_chunks_mut(stride))
                .map(|(src_row, dst_row)| composition.process_row(src_row, dst_row))
                .collect()
        } else {
            src.chunks(stride)
                .zip(dst.chunks_mut(stride))
                .map(|(src_row, dst_row)| composition.process_row(src_row, dst_row))
                .collect()
        };

        let stats = row_stats
            .into_iter()
            .fold(AggregateStats::new(), AggregateStats::merge);
        let border_color = stats.border_color()?;
        let buffer = PixelBuffer::new(input.width(), input.height(), dst)?;
        let duration = start.elapsed();

        debug!(
            "filtered {} pixels in {:?}, border color {}",
            stats.count, duration, border_color
        );

        Ok(PipelineOutput {
            buffer,
            border_color,
            stats,
            duration,
        })
    }
}
