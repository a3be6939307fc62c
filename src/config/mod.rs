//! # Batch Configuration
//!
//! Explicit, validated configuration for batch orchestration. Every execution
//! takes its settings from a `BatchConfig` value owned by the caller; there is
//! no process-wide strategy state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasker_batch::config::{BatchConfig, ExecutionStrategy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Size the fan-out to the pool the lookups will run against
//! let config = BatchConfig::from_pool_size(25)
//!     .with_batch_size(500)
//!     .with_strategy(ExecutionStrategy::Auto);
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::BatchConfigLoader;

/// How batches are dispatched once the input spans more than one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Parallel while the batch count fits under `max_concurrent`,
    /// otherwise whatever `auto_overflow` selects
    #[default]
    Auto,
    /// Dispatch every batch at once, ignoring `max_concurrent`
    Parallel,
    /// One batch at a time
    Sequential,
    /// Groups of `max_concurrent` batches, each group joined before the next
    Chunked,
}

impl ExecutionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Parallel => "parallel",
            Self::Sequential => "sequential",
            Self::Chunked => "chunked",
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStrategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "parallel" => Ok(Self::Parallel),
            "sequential" => Ok(Self::Sequential),
            "chunked" => Ok(Self::Chunked),
            _ => Err(ConfigurationError::invalid_strategy(s)),
        }
    }
}

/// What `ExecutionStrategy::Auto` falls back to when there are more batches
/// than `max_concurrent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Waves of `max_concurrent` concurrent lookups
    #[default]
    ChunkedParallel,
    /// Plain one-at-a-time processing
    Sequential,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkedParallel => f.write_str("chunked_parallel"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chunked_parallel" | "chunked" => Ok(Self::ChunkedParallel),
            "sequential" => Ok(Self::Sequential),
            _ => Err(ConfigurationError::invalid_overflow_policy(s)),
        }
    }
}

/// Settings for one orchestrated execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum items per lookup invocation
    pub batch_size: usize,

    /// Maximum lookup invocations in flight at once (the pool ceiling)
    pub max_concurrent: usize,

    /// Dispatch strategy for multi-batch inputs
    pub strategy: ExecutionStrategy,

    /// Fallback used by `auto` once batches outnumber `max_concurrent`
    pub auto_overflow: OverflowPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            strategy: ExecutionStrategy::default(),
            auto_overflow: OverflowPolicy::default(),
        }
    }
}

impl BatchConfig {
    /// Derive the concurrency ceiling from a connection pool size
    ///
    /// A pool size of zero is treated as one connection.
    pub fn from_pool_size(max_connections: u32) -> Self {
        Self {
            max_concurrent: max_connections.max(1) as usize,
            ..Self::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_auto_overflow(mut self, auto_overflow: OverflowPolicy) -> Self {
        self.auto_overflow = auto_overflow;
        self
    }

    /// Validate configuration values
    ///
    /// Both `batch_size` and `max_concurrent` must be at least 1.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigurationError::invalid_value(
                "batch_size",
                "0",
                "batch size must be greater than 0",
            ));
        }

        if self.max_concurrent == 0 {
            return Err(ConfigurationError::invalid_value(
                "max_concurrent",
                "0",
                "max concurrent lookups must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_config_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.strategy, ExecutionStrategy::Auto);
        assert_eq!(config.auto_overflow, OverflowPolicy::ChunkedParallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let config = BatchConfig::default().with_batch_size(0);
        match config.validate() {
            Err(ConfigurationError::InvalidValue { field, .. }) => assert_eq!(field, "batch_size"),
            other => panic!("expected invalid batch_size, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_max_concurrent() {
        let config = BatchConfig::default().with_max_concurrent(0);
        match config.validate() {
            Err(ConfigurationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "max_concurrent")
            }
            other => panic!("expected invalid max_concurrent, got {other:?}"),
        }
    }

    #[test]
    fn test_from_pool_size() {
        assert_eq!(BatchConfig::from_pool_size(25).max_concurrent, 25);
        assert_eq!(BatchConfig::from_pool_size(0).max_concurrent, 1);
        assert_eq!(BatchConfig::from_pool_size(25).batch_size, 1000);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("auto".parse::<ExecutionStrategy>().unwrap(), ExecutionStrategy::Auto);
        assert_eq!(
            " Parallel ".parse::<ExecutionStrategy>().unwrap(),
            ExecutionStrategy::Parallel
        );
        assert_eq!(
            "SEQUENTIAL".parse::<ExecutionStrategy>().unwrap(),
            ExecutionStrategy::Sequential
        );
        assert_eq!(
            "chunked".parse::<ExecutionStrategy>().unwrap(),
            ExecutionStrategy::Chunked
        );
        assert!(matches!(
            "fastest".parse::<ExecutionStrategy>(),
            Err(ConfigurationError::InvalidStrategy { .. })
        ));
    }

    #[test]
    fn test_overflow_policy_parsing() {
        assert_eq!(
            "chunked_parallel".parse::<OverflowPolicy>().unwrap(),
            OverflowPolicy::ChunkedParallel
        );
        assert_eq!(
            "sequential".parse::<OverflowPolicy>().unwrap(),
            OverflowPolicy::Sequential
        );
        assert!("parallel".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [
            ExecutionStrategy::Auto,
            ExecutionStrategy::Parallel,
            ExecutionStrategy::Sequential,
            ExecutionStrategy::Chunked,
        ] {
            assert_eq!(strategy.to_string().parse::<ExecutionStrategy>().unwrap(), strategy);
        }
    }
}
