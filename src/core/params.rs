//! Filter parameters.
//!
//! The parameter set has a fixed key set, one entry per [`FilterKind`]. Each
//! entry carries its current value and its neutral default; a filter is a
//! no-op exactly when the two compare equal.

use crate::core::error::{FilterError, FilterResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of adjustable parameters.
pub const FILTER_COUNT: usize = 10;

/// Every adjustable parameter, in key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Blur radius in pixels, applied after the per-pixel pass.
    Blur,
    /// Brightness factor, 1 is neutral.
    Brightness,
    /// Contrast factor, 1 is neutral.
    Contrast,
    /// Grayscale amount in `[0, 1]`.
    Grayscale,
    /// Hue rotation in degrees.
    Hue,
    /// Invert amount in `[0, 1]`.
    Invert,
    /// Alpha multiplier, 1 is neutral.
    Opacity,
    /// Saturation factor, 1 is neutral.
    Saturate,
    /// Sepia amount in `[0, 1]`.
    Sepia,
    /// Frame width in pixels, 0 draws nothing.
    Border,
}

impl FilterKind {
    /// All kinds, in key order.
    pub const ALL: [FilterKind; FILTER_COUNT] = [
        FilterKind::Blur,
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::Grayscale,
        FilterKind::Hue,
        FilterKind::Invert,
        FilterKind::Opacity,
        FilterKind::Saturate,
        FilterKind::Sepia,
        FilterKind::Border,
    ];

    /// Key used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Blur => "blur",
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Hue => "hue",
            FilterKind::Invert => "invert",
            FilterKind::Opacity => "opacity",
            FilterKind::Saturate => "saturate",
            FilterKind::Sepia => "sepia",
            FilterKind::Border => "border",
        }
    }

    /// The value at which this filter has no effect.
    pub fn neutral(&self) -> f64 {
        match self {
            FilterKind::Brightness
            | FilterKind::Contrast
            | FilterKind::Opacity
            | FilterKind::Saturate => 1.0,
            FilterKind::Blur
            | FilterKind::Grayscale
            | FilterKind::Hue
            | FilterKind::Invert
            | FilterKind::Sepia
            | FilterKind::Border => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// A single filter's current value alongside its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setting {
    /// Current value.
    pub value: f64,
    /// Neutral value at which the filter is a no-op.
    pub default: f64,
}

impl Setting {
    /// Create a setting.
    pub const fn new(value: f64, default: f64) -> Self {
        Self { value, default }
    }

    /// Whether the filter should transform its input.
    ///
    /// Exact comparison: values arbitrarily close to the default still count
    /// as active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.value != self.default
    }
}

/// Current values and defaults for every [`FilterKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct FilterParameters {
    values: [f64; FILTER_COUNT],
    defaults: [f64; FILTER_COUNT],
}

impl FilterParameters {
    /// Every filter at its neutral default.
    pub fn new() -> Self {
        let defaults = FilterKind::ALL.map(|kind| kind.neutral());
        Self {
            values: defaults,
            defaults,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, kind: FilterKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Current value of a filter.
    pub fn get(&self, kind: FilterKind) -> f64 {
        self.values[kind.index()]
    }

    /// Default value of a filter.
    pub fn default_of(&self, kind: FilterKind) -> f64 {
        self.defaults[kind.index()]
    }

    /// Current value and default of a filter.
    pub fn setting(&self, kind: FilterKind) -> Setting {
        Setting::new(self.get(kind), self.default_of(kind))
    }

    /// Whether the filter differs from its default.
    pub fn is_active(&self, kind: FilterKind) -> bool {
        self.setting(kind).is_active()
    }

    /// Set a filter's current value.
    pub fn set(&mut self, kind: FilterKind, value: f64) {
        self.values[kind.index()] = value;
    }

    /// Set a filter from its textual name and value, as delivered by a slider.
    pub fn set_from_str(&mut self, name: &str, value: &str) -> FilterResult<()> {
        let kind: FilterKind = name.parse()?;
        let parsed = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FilterError::InvalidValue {
                filter: name.to_string(),
                value: value.to_string(),
            })?;
        self.set(kind, parsed);
        Ok(())
    }

    /// Return every filter to its default.
    pub fn reset(&mut self) {
        self.values = self.defaults;
    }

    /// Iterate over all filters with their settings, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, Setting)> + '_ {
        FilterKind::ALL.iter().map(move |&kind| (kind, self.setting(kind)))
    }

    /// Filters that currently differ from their default.
    pub fn active(&self) -> Vec<FilterKind> {
        self.iter()
            .filter(|(_, setting)| setting.is_active())
            .map(|(kind, _)| kind)
            .collect()
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<BTreeMap<String, f64>> for FilterParameters {
    type Error = FilterError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut params = FilterParameters::new();
        for (name, value) in map {
            let kind: FilterKind = name.parse()?;
            params.set(kind, value);
        }
        Ok(params)
    }
}

impl From<FilterParameters> for BTreeMap<String, f64> {
    fn from(params: FilterParameters) -> Self {
        params
            .iter()
            .map(|(kind, setting)| (kind.name().to_string(), setting.value))
            .collect()
    }
}
