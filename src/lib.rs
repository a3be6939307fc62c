#![allow(clippy::doc_markdown)] // Allow identifiers like BatchConfig, TASKER_BATCH in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Tasker Batch
//!
//! Connection-pool aware batch orchestration for large identifier lookups.
//!
//! ## Overview
//!
//! Looking up tens of thousands of records by id in a single query runs into
//! bind-parameter ceilings; firing one query per batch all at once runs into
//! the connection pool. This crate partitions the ids into fixed-size batches,
//! drives a caller-supplied async lookup over them, and concatenates the
//! results in input order, choosing between sequential, parallel and
//! concurrency-limited dispatch so that no more than `max_concurrent` lookups
//! hold a connection at once.
//!
//! ## Module Organization
//!
//! - [`orchestration`] - Partitioning, strategy resolution and dispatch
//! - [`config`] - Batch configuration, validation and layered loading
//! - [`error`] - Structured error handling
//! - [`constants`] - Defaults sized to external limits
//! - [`logging`] - Console / JSON tracing subscribers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasker_batch::{BatchConfig, BatchOrchestrator, ExecutionStrategy};
//!
//! # async fn fetch_names(ids: Vec<i64>) -> Result<Vec<String>, std::io::Error> { Ok(vec![]) }
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = BatchOrchestrator::new(
//!     BatchConfig::from_pool_size(10).with_strategy(ExecutionStrategy::Auto),
//! )?;
//!
//! let ids: Vec<i64> = (1..=25_000).collect();
//! let names = orchestrator.execute(ids, fetch_names).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod orchestration;

pub use crate::config::{
    BatchConfig, BatchConfigLoader, ConfigResult, ConfigurationError, ExecutionStrategy,
    OverflowPolicy,
};
pub use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT};
pub use crate::error::{BatchError, BatchResult};
pub use crate::logging::{init_json_logging, init_structured_logging};
pub use crate::orchestration::{
    execute, partition, Batch, BatchLookup, BatchOrchestrator, ExecutionPlan, ResolvedStrategy,
};
