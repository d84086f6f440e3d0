//! Filter metadata.
//!
//! Metadata describes a filter for UIs and the command line: its key, display
//! name, the domain it operates in, its neutral default and the range a slider
//! would offer. It never changes what a filter computes.

use crate::core::params::FilterKind;
use serde::{Deserialize, Serialize};

/// Domain a filter operates in, used to group filters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Per-channel RGB math
    Rgb,
    /// Hue/saturation/lightness math
    Hsl,
    /// Alpha channel only
    Alpha,
    /// Whole-raster operations after the per-pixel pass
    Raster,
    /// Drawing on the presentation surface
    Frame,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Rgb => "RGB",
            Category::Hsl => "HSL",
            Category::Alpha => "Alpha",
            Category::Raster => "Raster",
            Category::Frame => "Frame",
        }
    }

    /// Get all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Hsl,
            Category::Rgb,
            Category::Alpha,
            Category::Raster,
            Category::Frame,
        ]
    }
}

/// UI hints for parameter display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "widget", content = "options")]
pub enum UiHint {
    /// Slider for numeric values
    Slider {
        /// Slider increment
        step: f64,
    },
    /// Angle input (with circular widget)
    Angle,
    /// Integer pixel count
    SpinBox,
}

/// Inclusive range a slider offers for a filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    /// Lowest slider value.
    pub min: f64,
    /// Highest slider value.
    pub max: f64,
}

impl ValueRange {
    /// Create a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Metadata describing a single filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterMetadata {
    /// Which parameter this describes
    pub kind: FilterKind,
    /// Unique identifier (the parameter key, e.g. "brightness")
    pub id: String,
    /// Human-readable name (e.g. "Brightness")
    pub name: String,
    /// Category for grouping
    pub category: Category,
    /// Detailed description
    pub description: String,
    /// Neutral value
    pub default_value: f64,
    /// Range a slider offers
    pub range: ValueRange,
    /// Widget hint
    pub ui_hint: UiHint,
    /// Position in the per-pixel composition, if the filter takes part in it
    pub stage: Option<usize>,
}

impl FilterMetadata {
    /// Start building metadata for a filter.
    pub fn builder(kind: FilterKind, name: impl Into<String>) -> FilterMetadataBuilder {
        FilterMetadataBuilder::new(kind, name)
    }

    /// Whether a value falls inside the documented slider range.
    pub fn in_range(&self, value: f64) -> bool {
        self.range.contains(value)
    }
}

/// Builder for [`FilterMetadata`].
pub struct FilterMetadataBuilder {
    metadata: FilterMetadata,
}

impl FilterMetadataBuilder {
    /// Create a new builder. The default value is taken from the kind.
    pub fn new(kind: FilterKind, name: impl Into<String>) -> Self {
        Self {
            metadata: FilterMetadata {
                kind,
                id: kind.name().to_string(),
                name: name.into(),
                category: Category::Rgb,
                description: String::new(),
                default_value: kind.neutral(),
                range: ValueRange::new(0.0, 1.0),
                ui_hint: UiHint::Slider { step: 0.01 },
                stage: None,
            },
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    /// Set the category.
    pub fn category(mut self, category: Category) -> Self {
        self.metadata.category = category;
        self
    }

    /// Set the slider range.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.metadata.range = ValueRange::new(min, max);
        self
    }

    /// Set the widget hint.
    pub fn ui_hint(mut self, hint: UiHint) -> Self {
        self.metadata.ui_hint = hint;
        self
    }

    /// Set the composition stage.
    pub fn stage(mut self, stage: usize) -> Self {
        self.metadata.stage = Some(stage);
        self
    }

    /// Build the metadata.
    pub fn build(self) -> FilterMetadata {
        self.metadata
    }
}
