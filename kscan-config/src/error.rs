//! Error types of kscan-config

use std::fmt;

/// Error raised while loading a keypad configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// The file isn't valid TOML, or doesn't have the expected shape
    Parse { path: String, message: String },
    /// Validation error with context
    Validation { field: String, message: String },
    /// A row or column line named something that isn't a pin, e.g. `""` or `"PD 1"`
    InvalidPin { field: String, pin: String },
    /// Invalid value
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
            ConfigError::InvalidPin { field, pin } => {
                write!(f, "Invalid pin name '{}' in '{}', expected an alphanumeric name like 'PD1'", pin, field)
            }
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for '{}', expected: {}",
                    value, field, expected
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
