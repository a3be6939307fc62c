//! # System Constants
//!
//! Defaults that define the operational boundaries of batch orchestration.
//! Both values model limits of external systems rather than anything inside
//! this crate, so they are exposed for callers that size their own pools.

/// Default number of items handed to a single lookup invocation.
///
/// Sized to keep one `WHERE id = ANY($1)` / `IN (...)` style query well below
/// typical bind-parameter ceilings.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default ceiling on lookup invocations in flight at once.
///
/// Matches the default `max_connections` of a sqlx pool, so `auto` never asks
/// for more connections than a default pool can hand out.
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Environment variable configuration
pub mod env {
    /// Prefix applied to every environment override read by the config loader
    pub const CONFIG_PREFIX: &str = "TASKER_BATCH";

    /// Environment name used to pick a default log level
    pub const ENVIRONMENT: &str = "TASKER_ENV";

    /// Fallback environment name
    pub const APP_ENVIRONMENT: &str = "APP_ENV";
}

