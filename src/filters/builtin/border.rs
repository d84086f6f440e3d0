//! Border framing drawn on the presentation surface.
//!
//! The frame is four filled rectangles in canvas `(x, y, width, height)` form.
//! Their extents overhang the surface and overlap at the corners; clipping
//! to the surface is left to [`Surface::fill_rect`].

use crate::core::metadata::{Category, FilterMetadata, UiHint};
use crate::core::params::{FilterKind, Setting};
use crate::core::types::Color;
use crate::filters::registry::FilterRegistry;
use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use log::trace;

/// Register the border parameter.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(
        FilterMetadata::builder(FilterKind::Border, "Border")
            .description("Frame width in pixels, drawn in the inverse of the average color")
            .category(Category::Frame)
            .range(0.0, 1000.0)
            .ui_hint(UiHint::SpinBox)
            .build(),
    );
}

/// A drawable surface with canvas-style rectangle filling.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fill a rectangle with a solid color.
    ///
    /// Negative sizes extend the rectangle left/up from `(x, y)`. Anything
    /// outside the surface is clipped.
    fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color);
}

/// Clip a canvas rectangle to `[0, max_x) x [0, max_y)`.
///
/// Returns `(x, y, width, height)` of the visible part, or `None` when nothing
/// is visible.
pub fn clip_rect(
    mut x: i64,
    mut y: i64,
    mut width: i64,
    mut height: i64,
    max_x: u32,
    max_y: u32,
) -> Option<(u32, u32, u32, u32)> {
    if width < 0 {
        x += width;
        width = -width;
    }
    if height < 0 {
        y += height;
        height = -height;
    }

    let left = x.max(0);
    let top = y.max(0);
    let right = x.saturating_add(width).min(max_x as i64);
    let bottom = y.saturating_add(height).min(max_y as i64);

    if right <= left || bottom <= top {
        return None;
    }

    Some((
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

impl Surface for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        let (max_x, max_y) = self.dimensions();
        if let Some((x, y, w, h)) = clip_rect(x, y, width, height, max_x, max_y) {
            draw_filled_rect_mut(self, Rect::at(x as i32, y as i32).of_size(w, h), color.to_rgba());
        }
    }
}

/// Normalize a border parameter to a whole pixel width: nearest integer,
/// negative and NaN values giving 0.
pub fn border_width(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded > 0.0 {
        rounded as u32
    } else {
        0
    }
}

/// The four frame rectangles for a surface, as `(x, y, width, height)`.
///
/// Order: top, left, bottom, right.
pub fn frame_rects(
    width: u32,
    surface_width: u32,
    surface_height: u32,
) -> [(i64, i64, i64, i64); 4] {
    let w = width as i64;
    let full_w = surface_width as i64;
    let full_h = surface_height as i64;

    [
        (0, 0, full_w, w),
        (0, w, w, full_h),
        (w, full_h - w, full_w, full_h),
        (full_w - w, w, full_w, full_h - w),
    ]
}

/// Draw the border frame when the border setting is active.
///
/// Returns the pixel width drawn, or `None` when the setting is at its default.
pub fn draw_border<S: Surface + ?Sized>(
    surface: &mut S,
    border: Setting,
    color: Color,
) -> Option<u32> {
    if !border.is_active() {
        return None;
    }

    let width = border_width(border.value);
    trace!("drawing {}px border in {}", width, color);

    for (x, y, w, h) in frame_rects(width, surface.width(), surface.height()) {
        surface.fill_rect(x, y, w, h, color);
    }
    Some(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Color = Color::rgb(10, 200, 30);
    const PAPER: [u8; 4] = [1, 2, 3, 255];

    fn paper(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba(PAPER))
    }

    #[test]
    fn test_clip_rect() {
        assert_eq!(clip_rect(-2, -2, 5, 5, 10, 10), Some((0, 0, 3, 3)));
        assert_eq!(clip_rect(8, 8, 5, 5, 10, 10), Some((8, 8, 2, 2)));
        assert_eq!(clip_rect(4, 4, -2, -3, 10, 10), Some((2, 1, 2, 3)));
        assert_eq!(clip_rect(10, 0, 5, 5, 10, 10), None);
        assert_eq!(clip_rect(0, 0, 0, 5, 10, 10), None);
    }

    #[test]
    fn test_frame_geometry() {
        let rects = frame_rects(2, 10, 8);
        assert_eq!(rects[0], (0, 0, 10, 2));
        assert_eq!(rects[1], (0, 2, 2, 8));
        assert_eq!(rects[2], (2, 6, 10, 8));
        assert_eq!(rects[3], (8, 2, 10, 6));
    }

    #[test]
    fn test_draw_border() {
        let mut surface = paper(10, 8);
        let drawn = draw_border(&mut surface, Setting::new(2.0, 0.0), FRAME);
        assert_eq!(drawn, Some(2));

        for (x, y) in [(0, 0), (9, 1), (0, 7), (1, 5), (5, 6), (9, 7), (8, 3)] {
            assert_eq!(surface.get_pixel(x, y).0, [10, 200, 30, 255], "({}, {})", x, y);
        }
        for (x, y) in [(2, 2), (7, 5), (5, 4)] {
            assert_eq!(surface.get_pixel(x, y).0, PAPER, "({}, {})", x, y);
        }
    }

    #[test]
    fn test_default_border_draws_nothing() {
        let mut surface = paper(6, 6);
        assert_eq!(draw_border(&mut surface, Setting::new(0.0, 0.0), FRAME), None);
        assert!(surface.pixels().all(|p| p.0 == PAPER));
    }

    #[test]
    fn test_oversized_border_covers_surface() {
        let mut surface = paper(4, 4);
        draw_border(&mut surface, Setting::new(50.0, 0.0), FRAME);
        assert!(surface.pixels().all(|p| p.0 == [10, 200, 30, 255]));
    }

    #[test]
    fn test_border_width() {
        assert_eq!(border_width(3.4), 3);
        assert_eq!(border_width(3.5), 4);
        assert_eq!(border_width(-1.0), 0);
    }
}
