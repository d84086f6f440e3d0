//! Built-in filters.
//!
//! Per-pixel color filters live in [`hsl`] and [`color`]; [`blur`] and
//! [`border`] act on the whole image after the per-pixel pass. [`io`] loads
//! and exports images.

pub mod blur;
pub mod border;
pub mod color;
pub mod hsl;
pub mod io;

use crate::filters::registry::FilterRegistry;

/// Register all built-in filters.
pub fn register_all(registry: &mut FilterRegistry) {
    hsl::register(registry);
    color::register(registry);
    blur::register(registry);
    border::register(registry);
}

// Re-export for direct access
pub use blur::{blur_radius, BlurKind, BlurStep, BoxBlur, GaussianBlur};
pub use border::{border_width, draw_border, frame_rects, Surface};
pub use io::{border_limit, fit_to_region, load_image, save_image, save_png, to_data_url};
