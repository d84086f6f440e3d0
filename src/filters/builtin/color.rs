//! RGB-domain color filters (brightness, contrast, grayscale, invert, sepia)
//! and the alpha-only opacity filter.
//!
//! Each filter takes the triple by value plus its own [`Setting`] and returns
//! the adjusted triple. An inactive setting returns the input untouched.

use crate::core::metadata::{Category, FilterMetadata};
use crate::core::params::{FilterKind, Setting};
use crate::core::types::Rgb;
use crate::filters::registry::FilterRegistry;

/// Register RGB and alpha filters. Stages follow the per-pixel composition.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(
        FilterMetadata::builder(FilterKind::Brightness, "Brightness")
            .description("Add (value - 1) * 255 to every channel")
            .category(Category::Rgb)
            .range(0.0, 2.0)
            .stage(2)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Contrast, "Contrast")
            .description("Stretch channels away from mid-gray")
            .category(Category::Rgb)
            .range(0.0, 2.0)
            .stage(3)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Grayscale, "Grayscale")
            .description("Blend channels towards their mean")
            .category(Category::Rgb)
            .stage(4)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Invert, "Invert")
            .description("Blend channels towards their complement (0.5 gives flat gray)")
            .category(Category::Rgb)
            .stage(5)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Sepia, "Sepia")
            .description("Mix in the sepia tone matrix")
            .category(Category::Rgb)
            .stage(6)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Opacity, "Opacity")
            .description("Scale the alpha channel")
            .category(Category::Alpha)
            .stage(7)
            .build(),
    );
}

#[inline]
fn clamp_channel(value: f64) -> f64 {
    value.clamp(0.0, 255.0)
}

/// Shift every channel by `(value - 1) * 255`, clamped to `[0, 255]`.
pub fn brightness(rgb: Rgb, setting: Setting) -> Rgb {
    if !setting.is_active() {
        return rgb;
    }
    let shift = (setting.value - 1.0) * 255.0;
    rgb.map(|channel| clamp_channel(channel + shift))
}

/// Stretch channels around 128 by the contrast factor, clamped to `[0, 255]`.
pub fn contrast(rgb: Rgb, setting: Setting) -> Rgb {
    if !setting.is_active() {
        return rgb;
    }
    let c = (setting.value - 1.0) * 255.0;
    let factor = (259.0 * (c + 255.0)) / (255.0 * (259.0 - c));
    rgb.map(|channel| clamp_channel(factor * (channel - 128.0) + 128.0))
}

/// Blend each channel towards the channel mean.
pub fn grayscale(rgb: Rgb, setting: Setting) -> Rgb {
    if !setting.is_active() {
        return rgb;
    }
    let amount = setting.value;
    let avg = (rgb.r + rgb.g + rgb.b) / 3.0;
    rgb.map(|channel| channel * (1.0 - amount) + avg * amount)
}

/// Blend each channel towards its complement.
///
/// An amount of 0.5 lands every channel on 127.5 whatever the input.
pub fn invert(rgb: Rgb, setting: Setting) -> Rgb {
    if !setting.is_active() {
        return rgb;
    }
    let amount = setting.value;
    rgb.map(|channel| channel * (1.0 - amount) + (255.0 - channel) * amount)
}

/// Intel sepia matrix, mixed with the input and halved.
pub fn sepia(rgb: Rgb, setting: Setting) -> Rgb {
    if !setting.is_active() {
        return rgb;
    }
    let amount = setting.value;
    let Rgb { r, g, b } = rgb;

    let rs = 0.393 * r + 0.769 * g + 0.189 * b;
    let gs = 0.349 * r + 0.686 * g + 0.168 * b;
    let bs = 0.272 * r + 0.534 * g + 0.131 * b;

    Rgb::new(
        (amount * rs + (1.0 - amount) * r) / 2.0,
        (amount * gs + (1.0 - amount) * g) / 2.0,
        (amount * bs + (1.0 - amount) * b) / 2.0,
    )
}

/// Scale an alpha value by the opacity amount.
///
/// The caller rounds and clamps when storing the result.
pub fn opacity(alpha: f64, setting: Setting) -> f64 {
    if !setting.is_active() {
        return alpha;
    }
    alpha * setting.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(value: f64, default: f64) -> Setting {
        Setting::new(value, default)
    }

    #[test]
    fn test_brightness_clamps() {
        let out = brightness(Rgb::new(100.0, 100.0, 100.0), at(2.0, 1.0));
        assert_eq!(out, Rgb::new(255.0, 255.0, 255.0));

        let out = brightness(Rgb::new(100.0, 10.0, 200.0), at(0.8, 1.0));
        assert!((out.r - 49.0).abs() < 1e-9);
        assert_eq!(out.g, 0.0);
        assert!((out.b - 149.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast() {
        let input = Rgb::new(10.0, 128.0, 250.0);
        assert_eq!(contrast(input, at(1.0, 1.0)), input);

        let out = contrast(input, at(1.5, 1.0));
        // The midpoint is fixed, the extremes are pushed out and clamped.
        assert_eq!(out.g, 128.0);
        assert_eq!(out.r, 0.0);
        assert_eq!(out.b, 255.0);

        let flat = contrast(input, at(0.0, 1.0));
        assert_eq!(flat, Rgb::new(128.0, 128.0, 128.0));
    }

    #[test]
    fn test_grayscale() {
        let out = grayscale(Rgb::new(30.0, 60.0, 90.0), at(1.0, 0.0));
        assert_eq!(out, Rgb::new(60.0, 60.0, 60.0));

        let half = grayscale(Rgb::new(30.0, 60.0, 90.0), at(0.5, 0.0));
        assert_eq!(half, Rgb::new(45.0, 60.0, 75.0));
    }

    #[test]
    fn test_invert_full_and_half() {
        let out = invert(Rgb::new(0.0, 55.0, 255.0), at(1.0, 0.0));
        assert_eq!(out, Rgb::new(255.0, 200.0, 0.0));

        for input in [Rgb::new(0.0, 0.0, 0.0), Rgb::new(12.0, 200.0, 255.0)] {
            assert_eq!(invert(input, at(0.5, 0.0)), Rgb::new(127.5, 127.5, 127.5));
        }
    }

    #[test]
    fn test_sepia() {
        let out = sepia(Rgb::new(100.0, 100.0, 100.0), at(1.0, 0.0));
        assert!((out.r - 67.55).abs() < 1e-9);
        assert!((out.g - 60.15).abs() < 1e-9);
        assert!((out.b - 46.85).abs() < 1e-9);

        // Even the weakest active sepia halves the input.
        let faint = sepia(Rgb::new(200.0, 100.0, 50.0), at(1e-12, 0.0));
        assert!((faint.r - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_opacity() {
        assert_eq!(opacity(200.0, at(0.5, 1.0)), 100.0);
        assert_eq!(opacity(200.0, at(1.0, 1.0)), 200.0);
    }

    proptest! {
        #[test]
        fn prop_defaults_are_identity(
            r in 0.0f64..=255.0,
            g in 0.0f64..=255.0,
            b in 0.0f64..=255.0,
        ) {
            let rgb = Rgb::new(r, g, b);
            prop_assert_eq!(brightness(rgb, at(1.0, 1.0)), rgb);
            prop_assert_eq!(contrast(rgb, at(1.0, 1.0)), rgb);
            prop_assert_eq!(grayscale(rgb, at(0.0, 0.0)), rgb);
            prop_assert_eq!(invert(rgb, at(0.0, 0.0)), rgb);
            prop_assert_eq!(sepia(rgb, at(0.0, 0.0)), rgb);
            prop_assert_eq!(opacity(r, at(1.0, 1.0)), r);
        }

        #[test]
        fn prop_convex_filters_stay_in_range(
            r in 0.0f64..=255.0,
            g in 0.0f64..=255.0,
            b in 0.0f64..=255.0,
            amount in 0.0f64..=1.0,
        ) {
            let rgb = Rgb::new(r, g, b);
            for out in [grayscale(rgb, at(amount, 0.0)), invert(rgb, at(amount, 0.0))] {
                for channel in out.to_array() {
                    prop_assert!((-1e-9..=255.0 + 1e-9).contains(&channel));
                }
            }
        }
    }
}
