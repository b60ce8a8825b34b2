//! Errors raised while reading service configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable with no usable default was unset
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable was set but did not parse
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Parsed values are inconsistent with each other or out of range
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
