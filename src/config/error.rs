//! Configuration Error Types
//!
//! Errors raised while loading or validating batch configuration. Each variant
//! names the offending field so misconfiguration is caught before any batching
//! starts.

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid configuration value
    #[error("Invalid value '{value}' for field '{field}': {context}")]
    InvalidValue {
        field: String,
        value: String,
        context: String,
    },

    /// Unrecognized execution strategy name
    #[error("Unknown execution strategy '{value}', expected one of: auto, parallel, sequential, chunked")]
    InvalidStrategy { value: String },

    /// Unrecognized auto overflow policy name
    #[error("Unknown overflow policy '{value}', expected one of: chunked_parallel, sequential")]
    InvalidOverflowPolicy { value: String },

    /// Layered file/environment loading failed
    #[error("Failed to load batch configuration: {source}")]
    LoadError {
        #[source]
        source: ::config::ConfigError,
    },
}

impl ConfigurationError {
    /// Create an invalid value error
    pub fn invalid_value<F, V, C>(field: F, value: V, context: C) -> Self
    where
        F: Into<String>,
        V: Into<String>,
        C: Into<String>,
    {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            context: context.into(),
        }
    }

    /// Create an unknown strategy error
    pub fn invalid_strategy<V: Into<String>>(value: V) -> Self {
        Self::InvalidStrategy {
            value: value.into(),
        }
    }

    /// Create an unknown overflow policy error
    pub fn invalid_overflow_policy<V: Into<String>>(value: V) -> Self {
        Self::InvalidOverflowPolicy {
            value: value.into(),
        }
    }
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(source: ::config::ConfigError) -> Self {
        Self::LoadError { source }
    }
}
