//! Interactive edit session.
//!
//! A session keeps the untouched original image and the current parameter
//! set. Every render starts again from the original, so parameter changes
//! never accumulate.

use crate::config::PipelineConfig;
use crate::core::error::FilterResult;
use crate::core::params::{FilterKind, FilterParameters};
use crate::core::types::{Color, PixelBuffer};
use crate::execution::engine::{ExecutionOptions, PipelineRunner};
use crate::execution::stats::AggregateStats;
use crate::filters::builtin::{
    blur_radius, border_limit, draw_border, load_image, BlurKind, BlurStep,
};
use crate::filters::registry::FilterRegistry;
use image::RgbaImage;
use log::{debug, warn};
use std::path::Path;

/// Hook that draws onto the working copy before filtering, e.g. a caption.
pub trait InputOverlay: Send + Sync {
    /// Modify `buffer` in place.
    fn apply(&self, buffer: &mut PixelBuffer) -> FilterResult<()>;
}

/// Output of [`EditSession::render`].
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Filtered, blurred and framed image.
    pub surface: RgbaImage,
    /// Color the frame was (or would be) drawn in.
    pub border_color: Color,
    /// Statistics of the filtered pixels.
    pub stats: AggregateStats,
    /// Frame width drawn, if the border filter was active.
    pub border_width: Option<u32>,
}

/// The original image plus the parameters being edited.
pub struct EditSession {
    original: PixelBuffer,
    params: FilterParameters,
    registry: FilterRegistry,
    runner: PipelineRunner,
    blur: Box<dyn BlurStep>,
    overlay: Option<Box<dyn InputOverlay>>,
}

impl EditSession {
    /// Start a session on an acquired image with default parameters.
    pub fn new(original: PixelBuffer) -> Self {
        Self {
            original,
            params: FilterParameters::new(),
            registry: FilterRegistry::with_builtins(),
            runner: PipelineRunner::new(),
            blur: BlurKind::default().step(),
            overlay: None,
        }
    }

    /// Load an image file and start a session on it.
    pub fn open(path: impl AsRef<Path>, region: Option<(u32, u32)>) -> FilterResult<Self> {
        Ok(Self::new(load_image(path, region)?))
    }

    /// Start a session configured from a [`PipelineConfig`].
    pub fn from_config(original: PixelBuffer, config: &PipelineConfig) -> Self {
        let mut session = Self::new(original)
            .with_options(config.execution.clone())
            .with_blur(config.blur.kind);
        session.params = config.parameters.clone();
        session
    }

    /// Use the given execution options.
    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.runner = PipelineRunner::with_options(options);
        self
    }

    /// Use the given blur implementation.
    pub fn with_blur(mut self, kind: BlurKind) -> Self {
        self.blur = kind.step();
        self
    }

    /// Install an input overlay.
    pub fn with_overlay(mut self, overlay: Box<dyn InputOverlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// The untouched original image.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// Current parameters.
    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    /// Change one parameter.
    pub fn set(&mut self, kind: FilterKind, value: f64) {
        if let Some(meta) = self.registry.get(kind) {
            if !meta.in_range(value) {
                warn!(
                    "{} = {} is outside its usual range {}..={}",
                    kind, value, meta.range.min, meta.range.max
                );
            }
        }
        self.params.set(kind, value);
    }

    /// Change one parameter from its textual name and value.
    pub fn set_from_str(&mut self, name: &str, value: &str) -> FilterResult<()> {
        let mut params = self.params.clone();
        params.set_from_str(name, value)?;
        let kind: FilterKind = name.parse()?;
        self.set(kind, params.get(kind));
        Ok(())
    }

    /// Return every parameter to its default.
    pub fn reset(&mut self) {
        self.params.reset();
    }

    /// Produce the presentation image for the current parameters.
    ///
    /// Steps: overlay on a copy of the original, per-pixel pass, blur,
    /// then the border frame in the complement of the mean color.
    pub fn render(&self) -> FilterResult<Rendered> {
        let mut working = self.original.clone();
        if let Some(overlay) = &self.overlay {
            overlay.apply(&mut working)?;
        }

        let output = self.runner.run(&working, &self.params)?;
        let mut buffer = output.buffer;

        let blur = self.params.setting(FilterKind::Blur);
        if blur.is_active() {
            let radius = blur_radius(blur.value);
            if radius > 0 {
                debug!("{} blur, radius {}", self.blur.name(), radius);
                self.blur.blur(&mut buffer, radius)?;
            }
        }

        let (width, height) = (buffer.width(), buffer.height());
        let mut surface = buffer.into_rgba_image();
        let border = self.params.setting(FilterKind::Border);
        let border_width = draw_border(&mut surface, border, output.border_color);

        if let Some(drawn) = border_width {
            let limit = border_limit(width, height);
            if drawn > limit {
                warn!(
                    "border of {}px exceeds the {}px limit for a {}x{} image",
                    drawn, limit, width, height
                );
            }
        }

        Ok(Rendered {
            surface,
            border_color: output.border_color,
            stats: output.stats,
            border_width,
        })
    }
}
