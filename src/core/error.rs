//! Error types for pixelfilter.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Name the offending filter or buffer dimension
//! - Carry a suggested fix where one exists
//! - Convert automatically from the I/O, image and config layers

use thiserror::Error;

/// Top-level error type for pixelfilter.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Malformed pixel buffer.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the buffer.
        reason: String,
    },

    /// A statistic was requested over zero pixels.
    #[error("Division by zero while computing {what}")]
    DivisionByZero {
        /// The quantity being computed.
        what: String,
    },

    /// Name does not match any filter.
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    /// Value text is not a finite number.
    #[error("Invalid value '{value}' for filter '{filter}'")]
    InvalidValue {
        /// Filter name as given.
        filter: String,
        /// Rejected value text.
        value: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FilterError {
    /// Shorthand for an [`FilterError::InvalidInput`] error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        FilterError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by a malformed pixel buffer.
    pub fn is_input_error(&self) -> bool {
        matches!(self, FilterError::InvalidInput { .. })
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            FilterError::UnknownFilter(name) => Some(format!(
                "'{}' is not a filter; run `pixelfilter list` to see the available names",
                name
            )),
            FilterError::InvalidValue { filter, .. } => {
                Some(format!("Pass a decimal number for '{}'", filter))
            }
            FilterError::InvalidInput { .. } => {
                Some("Check that the buffer holds width x height RGBA quads".to_string())
            }
            FilterError::DivisionByZero { .. } => Some("Supply a non-empty image".to_string()),
            _ => None,
        }
    }
}

/// Result type alias for pixelfilter operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = FilterError::invalid_input("buffer length 7 is not a multiple of 4");
        assert!(error.is_input_error());
        assert_eq!(
            error.to_string(),
            "Invalid input: buffer length 7 is not a multiple of 4"
        );
    }

    #[test]
    fn test_suggestions() {
        let error = FilterError::UnknownFilter("sharpen".to_string());
        assert!(error.suggested_fix().unwrap().contains("sharpen"));

        let error = FilterError::Config("missing section".to_string());
        assert!(error.suggested_fix().is_none());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: FilterError = io.into();
        assert!(matches!(error, FilterError::Io(_)));
        assert!(!error.is_input_error());
    }
}
