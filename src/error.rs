//! Configuration error types.
//!
//! The simulation itself cannot fail; only loading tuning data from outside
//! (a page element, a file on the native build) can.

use std::fmt;

/// Error raised while loading or validating tuning data
#[derive(Debug)]
pub enum ConfigError {
    /// The tuning source was not valid JSON for [`crate::Tuning`]
    Parse(serde_json::Error),
    /// A tuning file could not be read (native only)
    Io(std::io::Error),
    /// A value is outside the range the simulation can handle
    OutOfRange {
        /// Field name (for logging)
        name: &'static str,
        /// The rejected value
        value: f32,
        /// Human-readable description of the accepted range
        safe_range: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
            ConfigError::Io(e) => write!(f, "could not read tuning file: {}", e),
            ConfigError::OutOfRange {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;
