//! Core types for the pixelfilter pipeline.
//!
//! This module contains:
//! - Pixel buffers and color triples
//! - RGB/HSL conversion
//! - Filter parameters and their metadata
//! - Error types

pub mod colorspace;
pub mod error;
pub mod metadata;
pub mod params;
pub mod types;

// Re-export commonly used types
pub use colorspace::{hsl_to_rgb, rgb_to_hsl};
pub use error::{FilterError, FilterResult};
pub use metadata::{Category, FilterMetadata, UiHint, ValueRange};
pub use params::{FilterKind, FilterParameters, Setting};
pub use types::{Color, Hsl, PixelBuffer, Rgb};
