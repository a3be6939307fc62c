//! # Orchestration Engine
//!
//! Batch orchestration for large identifier lookups against a bounded
//! external resource such as a database connection pool.
//!
//! ## Architecture
//!
//! One execution flows through three stages:
//! - **Partition**: the input is split into contiguous batches of `batch_size`
//! - **Strategy resolution**: the requested strategy plus the batch count
//!   resolve to one concrete dispatch mode (direct, parallel, sequential or
//!   chunked-parallel)
//! - **Dispatch**: the caller's lookup runs per batch under that mode and the
//!   results are concatenated in batch order
//!
//! ## Core Components
//!
//! - **BatchOrchestrator**: validated configuration plus the `execute` entry points
//! - **ExecutionPlan**: the pure, inspectable outcome of strategy resolution
//! - **BatchLookup**: async trait seam for lookups owned by a struct
//! - **partition**: the batching step, usable on its own

pub mod lookup;
pub mod orchestrator;
pub mod partition;
pub mod strategy;

pub use lookup::BatchLookup;
pub use orchestrator::{execute, BatchOrchestrator};
pub use partition::{batch_count, partition, Batch};
pub use strategy::{ExecutionPlan, ResolvedStrategy};
