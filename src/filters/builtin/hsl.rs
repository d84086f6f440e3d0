//! HSL-domain filters: saturate and hue.

use crate::core::metadata::{Category, FilterMetadata, UiHint};
use crate::core::params::{FilterKind, Setting};
use crate::core::types::Hsl;
use crate::filters::registry::FilterRegistry;

/// Register HSL filters.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(
        FilterMetadata::builder(FilterKind::Saturate, "Saturate")
            .description("Multiply HSL saturation, capped at 1")
            .category(Category::Hsl)
            .range(0.0, 3.0)
            .stage(0)
            .build(),
    );
    registry.register(
        FilterMetadata::builder(FilterKind::Hue, "Hue Rotate")
            .description("Rotate hue by the given number of degrees")
            .category(Category::Hsl)
            .range(0.0, 360.0)
            .ui_hint(UiHint::Angle)
            .stage(1)
            .build(),
    );
}

/// Multiply saturation, capped at 1. There is no lower cap.
pub fn saturate(hsl: Hsl, setting: Setting) -> Hsl {
    if !setting.is_active() {
        return hsl;
    }
    let s = (hsl.s * setting.value).min(1.0);
    Hsl { s, ..hsl }
}

/// Rotate hue by `value` degrees.
///
/// Wraps by a single turn when the result exceeds 1; larger rotations and
/// negative results are left for the HSL→RGB helper to fold.
pub fn hue(hsl: Hsl, setting: Setting) -> Hsl {
    if !setting.is_active() {
        return hsl;
    }
    let mut h = hsl.h + setting.value / 360.0;
    if h > 1.0 {
        h -= 1.0;
    }
    Hsl { h, ..hsl }
}
