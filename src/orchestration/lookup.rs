//! Lookup seam for struct-based data sources.
//!
//! Closures are the lightest way to hand a lookup to the orchestrator. Types
//! that already own a pool or client can implement [`BatchLookup`] instead and
//! go through [`BatchOrchestrator::execute_lookup`].
//!
//! [`BatchOrchestrator::execute_lookup`]: super::BatchOrchestrator::execute_lookup

use async_trait::async_trait;

/// Fetches the records for one batch of keys
///
/// The orchestrator treats implementations as opaque: each call is independent,
/// may return any number of records, and is never retried.
#[async_trait]
pub trait BatchLookup<T: Send>: Send + Sync {
    type Output: Send;
    type Error: Send;

    async fn lookup(&self, batch: Vec<T>) -> Result<Vec<Self::Output>, Self::Error>;
}
