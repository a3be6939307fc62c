//! # Batch Orchestrator
//!
//! Splits an input sequence into fixed-size batches, dispatches the caller's
//! lookup over them under the resolved strategy, and concatenates the results
//! in batch order.
//!
//! All concurrency is cooperative: lookup futures are polled together on the
//! caller's task through `FuturesUnordered`, never spawned. The orchestrator
//! owns no timers or cancellation; once a lookup has been created it is driven
//! to completion.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::lookup::BatchLookup;
use super::partition::{split, Batch};
use super::strategy::{ExecutionPlan, ResolvedStrategy};
use crate::config::{BatchConfig, ConfigResult};
use crate::error::{BatchError, BatchResult};

/// Drives a lookup over batches of an input sequence
#[derive(Debug, Clone, Default)]
pub struct BatchOrchestrator {
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Create an orchestrator, rejecting invalid configuration up front
    pub fn new(config: BatchConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolve how `item_count` items would be executed, without invoking anything
    pub fn plan(&self, item_count: usize) -> ExecutionPlan {
        ExecutionPlan::new(&self.config, item_count)
    }

    /// Run `lookup` over `items` and return the concatenated results
    ///
    /// Output order always follows input order: the results of batch *i*
    /// precede those of batch *i+1* no matter which lookup finished first.
    /// The first lookup failure fails the whole call and no partial output is
    /// returned. Lookups already in flight when a failure is observed are
    /// polled to completion first, so a failed call returns only once the
    /// slowest lookup of its wave has finished.
    pub async fn execute<T, U, E, F, Fut>(&self, items: Vec<T>, lookup: F) -> BatchResult<Vec<U>, E>
    where
        F: Fn(Vec<T>) -> Fut,
        Fut: Future<Output = Result<Vec<U>, E>>,
    {
        let plan = self.plan(items.len());
        let span = info_span!(
            "batch_execute",
            item_count = plan.item_count,
            batch_count = plan.batch_count,
            strategy = %plan.strategy
        );

        run_plan(plan, items, lookup).instrument(span).await
    }

    /// Same as [`execute`](Self::execute), driving a [`BatchLookup`] implementation
    pub async fn execute_lookup<T, L>(
        &self,
        items: Vec<T>,
        lookup: &L,
    ) -> BatchResult<Vec<L::Output>, L::Error>
    where
        T: Send,
        L: BatchLookup<T> + ?Sized,
    {
        self.execute(items, |batch| lookup.lookup(batch)).await
    }
}

/// Run `lookup` over `items` with an optional configuration
///
/// `None` applies the default configuration. An invalid configuration fails
/// with [`BatchError::Configuration`] before any lookup is invoked.
pub async fn execute<T, U, E, F, Fut>(
    items: Vec<T>,
    lookup: F,
    config: Option<BatchConfig>,
) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    let orchestrator = BatchOrchestrator::new(config.unwrap_or_default())?;
    orchestrator.execute(items, lookup).await
}

async fn run_plan<T, U, E, F, Fut>(
    plan: ExecutionPlan,
    items: Vec<T>,
    lookup: F,
) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    debug!(
        requested = %plan.requested,
        batch_size = plan.batch_size,
        max_concurrent = plan.max_concurrent,
        group_sizes = ?plan.group_sizes(),
        "Resolved batch execution plan"
    );

    if plan.exceeds_ceiling() {
        warn!(
            peak_concurrency = plan.peak_concurrency(),
            max_concurrent = plan.max_concurrent,
            "Explicit parallel strategy dispatches more lookups than max_concurrent"
        );
    }

    let started = Instant::now();

    let output = match plan.strategy {
        ResolvedStrategy::Empty => {
            debug!("No items to look up");
            return Ok(Vec::new());
        }
        ResolvedStrategy::Direct => run_direct(items, &lookup).await?,
        ResolvedStrategy::Parallel => {
            run_concurrent(split(items, plan.batch_size), &lookup).await?
        }
        ResolvedStrategy::Sequential => {
            run_sequential(split(items, plan.batch_size), &lookup).await?
        }
        ResolvedStrategy::ChunkedParallel { group_size } => {
            run_chunked(split(items, plan.batch_size), group_size, &lookup).await?
        }
    };

    info!(
        output_count = output.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Batch execution complete"
    );

    Ok(output)
}

/// Single invocation with the whole input
async fn run_direct<T, U, E, F, Fut>(items: Vec<T>, lookup: &F) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    let batch_len = items.len();
    lookup(items).await.map_err(|source| {
        error!(batch_index = 0, batch_len, "Lookup failed");
        BatchError::lookup_failed(0, batch_len, source)
    })
}

/// One batch at a time; batch *i+1* is not created until batch *i* resolves
async fn run_sequential<T, U, E, F, Fut>(
    batches: Vec<Batch<T>>,
    lookup: &F,
) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    let batch_count = batches.len();
    let mut output = Vec::new();

    for Batch { index, items } in batches {
        let batch_len = items.len();
        debug!(batch_index = index, batch_len, "Dispatching sequential lookup");

        match lookup(items).await {
            Ok(values) => output.extend(values),
            Err(source) => {
                error!(
                    batch_index = index,
                    batch_len,
                    skipped_batches = batch_count - index - 1,
                    "Lookup failed, remaining batches will not be dispatched"
                );
                return Err(BatchError::lookup_failed(index, batch_len, source));
            }
        }
    }

    Ok(output)
}

/// Waves of `group_size` concurrent lookups; a wave starts only after the
/// previous one has fully joined
async fn run_chunked<T, U, E, F, Fut>(
    batches: Vec<Batch<T>>,
    group_size: usize,
    lookup: &F,
) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    let mut output = Vec::new();

    for group in split(batches, group_size) {
        debug!(
            group_index = group.index,
            group_len = group.len(),
            "Dispatching lookup group"
        );
        output.extend(run_concurrent(group.into_items(), lookup).await?);
    }

    Ok(output)
}

/// Dispatch every batch at once and join them all
///
/// On failure the remaining lookups are still driven to completion and their
/// results discarded; the first failure observed is returned.
async fn run_concurrent<T, U, E, F, Fut>(
    batches: Vec<Batch<T>>,
    lookup: &F,
) -> BatchResult<Vec<U>, E>
where
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<U>, E>>,
{
    // Results land in definition order, not completion order
    let mut slots: Vec<Option<Vec<U>>> = Vec::with_capacity(batches.len());
    slots.resize_with(batches.len(), || None);

    let mut in_flight: FuturesUnordered<_> = batches
        .into_iter()
        .enumerate()
        .map(|(position, batch)| {
            let (index, batch_len) = (batch.index, batch.len());
            let pending = lookup(batch.into_items());
            async move { (position, index, batch_len, pending.await) }
        })
        .collect();

    debug!(in_flight = in_flight.len(), "Dispatched concurrent lookups");

    let mut failure: Option<BatchError<E>> = None;

    while let Some((position, index, batch_len, result)) = in_flight.next().await {
        match result {
            Ok(values) if failure.is_none() => slots[position] = Some(values),
            Ok(_) => {}
            Err(source) if failure.is_none() => {
                error!(
                    batch_index = index,
                    batch_len,
                    still_in_flight = in_flight.len(),
                    "Lookup failed, discarding results of in-flight siblings"
                );
                failure = Some(BatchError::lookup_failed(index, batch_len, source));
            }
            Err(_) => {
                debug!(batch_index = index, "Additional lookup failure discarded");
            }
        }
    }

    if let Some(error) = failure {
        return Err(error);
    }

    Ok(slots.into_iter().flatten().flatten().collect())
}
