//! # pixelfilter - Per-pixel color filter pipeline
//!
//! pixelfilter applies a fixed chain of color filters (saturate, hue,
//! brightness, contrast, grayscale, invert, sepia, opacity) to an RGBA image in
//! one deterministic pass, then blurs and frames the result with a border in
//! the complement of the image's average color.
//!
//! ## Features
//!
//! - **Fixed composition order**: HSL filters first, then RGB filters, then alpha
//! - **Conditional no-ops**: a filter only runs when its value differs from its default
//! - **Deterministic parallelism**: row-parallel passes produce byte-identical output
//! - **Derived border color**: `255 - floor(mean)` of the filtered channels
//! - **Config files**: TOML or JSON parameter sets
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pixelfilter::prelude::*;
//!
//! let mut session = EditSession::open("input.png", Some((1280, 800)))?;
//! session.set(FilterKind::Hue, 40.0);
//! session.set(FilterKind::Border, 12.0);
//!
//! let rendered = session.render()?;
//! println!("border color: {}", rendered.border_color);
//! save_png(&rendered.surface, "output.png")?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: pixel buffers, color conversion, parameters and errors
//! - [`filters`]: filter registry and built-in filters
//! - [`execution`]: the pipeline runner and edit sessions
//! - [`config`]: configuration files

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod execution;
pub mod filters;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use pixelfilter::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::colorspace::{hsl_to_rgb, rgb_to_hsl};
    pub use crate::core::error::{FilterError, FilterResult};
    pub use crate::core::metadata::{Category, FilterMetadata, UiHint, ValueRange};
    pub use crate::core::params::{FilterKind, FilterParameters, Setting};
    pub use crate::core::types::{Color, Hsl, PixelBuffer, Rgb};

    // Execution
    pub use crate::execution::engine::{
        compose_pixel, ExecutionOptions, PipelineOutput, PipelineRunner,
    };
    pub use crate::execution::session::{EditSession, InputOverlay, Rendered};
    pub use crate::execution::stats::AggregateStats;

    // Filters
    pub use crate::filters::registry::FilterRegistry;
    pub use crate::filters::builtin::{
        // Blur
        BlurKind, BlurStep, BoxBlur, GaussianBlur,
        // Border
        draw_border, Surface,
        // I/O
        border_limit, fit_to_region, load_image, save_image, save_png, to_data_url,
    };

    // Configuration
    pub use crate::config::PipelineConfig;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "pixelfilter");
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = FilterRegistry::with_builtins();

        for kind in FilterKind::ALL {
            assert!(registry.contains(kind.name()), "missing {}", kind);
        }
        assert_eq!(registry.len(), FilterKind::ALL.len());
    }

    #[test]
    fn test_end_to_end_render() {
        let image = PixelBuffer::filled(12, 12, [60, 60, 60, 255]).unwrap();
        let config = PipelineConfig::from_toml_str(
            "[parameters]\nbrightness = 1.5\nborder = 3\n[execution]\nparallel = false\n",
        )
        .unwrap();

        let rendered = EditSession::from_config(image, &config).render().unwrap();
        // 60 + 0.5 * 255 = 187.5, stored as 188; the border complements the stored mean.
        assert_eq!(rendered.surface.get_pixel(6, 6).0, [188, 188, 188, 255]);
        assert_eq!(rendered.border_color.to_hex(), "#434343");
        assert_eq!(rendered.surface.get_pixel(0, 11).0, [67, 67, 67, 255]);
    }
}
