//! Pipeline configuration files.
//!
//! A configuration bundles filter parameters with execution, display and blur
//! settings. Files are TOML unless their extension is `.json`.

use crate::core::error::{FilterError, FilterResult};
use crate::core::params::FilterParameters;
use crate::execution::engine::ExecutionOptions;
use crate::filters::builtin::BlurKind;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display settings used during acquisition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Region to fit loaded images into, as `[width, height]`.
    pub region: Option<(u32, u32)>,
}

/// Blur step selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurSettings {
    /// Blur implementation used when the blur filter is active.
    pub kind: BlurKind,
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter values; missing keys stay at their defaults.
    pub parameters: FilterParameters,
    /// Parallelism options for the per-pixel pass.
    pub execution: ExecutionOptions,
    /// Acquisition settings.
    pub display: DisplaySettings,
    /// Blur step selection.
    pub blur: BlurSettings,
}

impl PipelineConfig {
    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> FilterResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()
    }

    /// Parse JSON text.
    pub fn from_json_str(text: &str) -> FilterResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> FilterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> FilterResult<String> {
        toml::to_string_pretty(self).map_err(|e| FilterError::Config(e.to_string()))
    }

    fn validate(self) -> FilterResult<Self> {
        if let Some((w, h)) = self.display.region {
            if w == 0 || h == 0 {
                return Err(FilterError::Config(format!(
                    "display region {}x{} has no area",
                    w, h
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::FilterKind;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[parameters]
brightness = 1.2
hue = 40

[execution]
parallel = false

[display]
region = [1280, 800]

[blur]
kind = "box"
"#;

    #[test]
    fn test_parse_toml() {
        let config = PipelineConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.parameters.get(FilterKind::Brightness), 1.2);
        assert_eq!(config.parameters.get(FilterKind::Hue), 40.0);
        assert_eq!(config.parameters.get(FilterKind::Contrast), 1.0);
        assert!(!config.execution.parallel);
        assert_eq!(
            config.execution.min_parallel_pixels,
            ExecutionOptions::default().min_parallel_pixels
        );
        assert_eq!(config.display.region, Some((1280, 800)));
        assert_eq!(config.blur.kind, BlurKind::Box);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
        assert_eq!(PipelineConfig::from_json_str("{}").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = PipelineConfig::from_toml_str("[parameters]\nsharpen = 2.0\n").unwrap_err();
        assert!(err.to_string().contains("sharpen"));
    }

    #[test]
    fn test_zero_region_rejected() {
        let err = PipelineConfig::from_json_str(r#"{"display": {"region": [0, 10]}}"#).unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let original = PipelineConfig::from_toml_str(SAMPLE).unwrap();

        let json_path = dir.path().join("pipeline.json");
        std::fs::write(&json_path, original.to_json().unwrap()).unwrap();
        assert_eq!(PipelineConfig::load(&json_path).unwrap(), original);

        let toml_path = dir.path().join("pipeline.toml");
        std::fs::write(&toml_path, original.to_toml().unwrap()).unwrap();
        assert_eq!(PipelineConfig::load(&toml_path).unwrap(), original);
    }
}
