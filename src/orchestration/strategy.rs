//! # Strategy Resolution
//!
//! Turns the requested [`ExecutionStrategy`] plus the shape of one input into
//! the concrete dispatch mode for that call. Resolution happens exactly once
//! per execution and is a pure function of `(config, item_count)`, so a plan
//! can be inspected without invoking any lookup.

use std::fmt;

use super::partition::count_batches;
use crate::config::{BatchConfig, ExecutionStrategy, OverflowPolicy};

/// Concrete dispatch mode chosen for a single execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedStrategy {
    /// No items; the lookup is never invoked
    Empty,
    /// Input fits in one batch; one lookup with the whole input
    Direct,
    /// Every batch dispatched at once
    Parallel,
    /// One batch at a time
    Sequential,
    /// Waves of at most `group_size` concurrent batches
    ChunkedParallel { group_size: usize },
}

impl ResolvedStrategy {
    /// Resolve the dispatch mode for `item_count` items under a validated `config`
    pub(crate) fn resolve(config: &BatchConfig, item_count: usize) -> Self {
        if item_count == 0 {
            return Self::Empty;
        }

        // Fast path: skip batching and strategy selection entirely
        if item_count <= config.batch_size {
            return Self::Direct;
        }

        let batches = count_batches(item_count, config.batch_size);
        let chunked = Self::ChunkedParallel {
            group_size: config.max_concurrent,
        };

        match config.strategy {
            ExecutionStrategy::Sequential => Self::Sequential,
            ExecutionStrategy::Parallel => Self::Parallel,
            ExecutionStrategy::Chunked => chunked,
            ExecutionStrategy::Auto if batches <= config.max_concurrent => Self::Parallel,
            ExecutionStrategy::Auto => match config.auto_overflow {
                OverflowPolicy::ChunkedParallel => chunked,
                OverflowPolicy::Sequential => Self::Sequential,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Direct => "direct",
            Self::Parallel => "parallel",
            Self::Sequential => "sequential",
            Self::ChunkedParallel { .. } => "chunked_parallel",
        }
    }
}

impl fmt::Display for ResolvedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of one execution, computed before any lookup is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub item_count: usize,
    pub batch_size: usize,
    pub batch_count: usize,
    pub max_concurrent: usize,
    pub requested: ExecutionStrategy,
    pub strategy: ResolvedStrategy,
}

impl ExecutionPlan {
    pub(crate) fn new(config: &BatchConfig, item_count: usize) -> Self {
        let strategy = ResolvedStrategy::resolve(config, item_count);
        let batch_count = match strategy {
            ResolvedStrategy::Empty => 0,
            ResolvedStrategy::Direct => 1,
            _ => count_batches(item_count, config.batch_size),
        };

        Self {
            item_count,
            batch_size: config.batch_size,
            batch_count,
            max_concurrent: config.max_concurrent,
            requested: config.strategy,
            strategy,
        }
    }

    /// Item count of each lookup invocation, in batch order
    pub fn batch_sizes(&self) -> Vec<usize> {
        match self.strategy {
            ResolvedStrategy::Empty => Vec::new(),
            ResolvedStrategy::Direct => vec![self.item_count],
            _ => {
                let mut sizes = vec![self.batch_size; self.batch_count];
                if let Some(last) = sizes.last_mut() {
                    *last = self.item_count - self.batch_size * (self.batch_count - 1);
                }
                sizes
            }
        }
    }

    /// Number of batches in each dispatch wave, in execution order
    ///
    /// Batches within a wave run concurrently; a wave starts only after the
    /// previous one has fully resolved.
    pub fn group_sizes(&self) -> Vec<usize> {
        match self.strategy {
            ResolvedStrategy::Empty => Vec::new(),
            ResolvedStrategy::Direct => vec![1],
            ResolvedStrategy::Parallel => vec![self.batch_count],
            ResolvedStrategy::Sequential => vec![1; self.batch_count],
            ResolvedStrategy::ChunkedParallel { group_size } => {
                let full_groups = self.batch_count / group_size;
                let mut sizes = vec![group_size; full_groups];
                let tail = self.batch_count % group_size;
                if tail > 0 {
                    sizes.push(tail);
                }
                sizes
            }
        }
    }

    /// Upper bound on lookups in flight at any instant
    pub fn peak_concurrency(&self) -> usize {
        self.group_sizes().into_iter().max().unwrap_or(0)
    }

    /// True when an explicit `parallel` request dispatches more lookups than
    /// `max_concurrent` allows
    pub fn exceeds_ceiling(&self) -> bool {
        self.peak_concurrency() > self.max_concurrent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: ExecutionStrategy) -> BatchConfig {
        BatchConfig::default()
            .with_batch_size(1000)
            .with_max_concurrent(10)
            .with_strategy(strategy)
    }

    #[test]
    fn test_empty_and_fast_path_ignore_strategy() {
        for strategy in [
            ExecutionStrategy::Auto,
            ExecutionStrategy::Parallel,
            ExecutionStrategy::Sequential,
            ExecutionStrategy::Chunked,
        ] {
            let config = config(strategy);
            assert_eq!(ResolvedStrategy::resolve(&config, 0), ResolvedStrategy::Empty);
            assert_eq!(ResolvedStrategy::resolve(&config, 1), ResolvedStrategy::Direct);
            assert_eq!(ResolvedStrategy::resolve(&config, 500), ResolvedStrategy::Direct);
            assert_eq!(ResolvedStrategy::resolve(&config, 1000), ResolvedStrategy::Direct);
        }
    }

    #[test]
    fn test_auto_within_ceiling_is_parallel() {
        let config = config(ExecutionStrategy::Auto);
        assert_eq!(ResolvedStrategy::resolve(&config, 1001), ResolvedStrategy::Parallel);
        assert_eq!(ResolvedStrategy::resolve(&config, 10_000), ResolvedStrategy::Parallel);
    }

    #[test]
    fn test_auto_overflow_policies() {
        let chunked = config(ExecutionStrategy::Auto);
        assert_eq!(
            ResolvedStrategy::resolve(&chunked, 10_001),
            ResolvedStrategy::ChunkedParallel { group_size: 10 }
        );

        let sequential = chunked.with_auto_overflow(OverflowPolicy::Sequential);
        assert_eq!(
            ResolvedStrategy::resolve(&sequential, 10_001),
            ResolvedStrategy::Sequential
        );
    }

    #[test]
    fn test_explicit_strategies() {
        assert_eq!(
            ResolvedStrategy::resolve(&config(ExecutionStrategy::Parallel), 50_000),
            ResolvedStrategy::Parallel
        );
        assert_eq!(
            ResolvedStrategy::resolve(&config(ExecutionStrategy::Sequential), 2000),
            ResolvedStrategy::Sequential
        );
        assert_eq!(
            ResolvedStrategy::resolve(&config(ExecutionStrategy::Chunked), 2000),
            ResolvedStrategy::ChunkedParallel { group_size: 10 }
        );
    }

    #[test]
    fn test_plan_scenario_a() {
        let plan = ExecutionPlan::new(&config(ExecutionStrategy::Parallel), 2500);
        assert_eq!(plan.batch_count, 3);
        assert_eq!(plan.batch_sizes(), vec![1000, 1000, 500]);
        assert_eq!(plan.group_sizes(), vec![3]);
        assert!(!plan.exceeds_ceiling());
    }

    #[test]
    fn test_plan_scenario_b_groups() {
        let plan = ExecutionPlan::new(&config(ExecutionStrategy::Auto), 25_000);
        assert_eq!(plan.batch_count, 25);
        assert_eq!(plan.group_sizes(), vec![10, 10, 5]);
        assert_eq!(plan.peak_concurrency(), 10);

        let sequential = config(ExecutionStrategy::Auto).with_auto_overflow(OverflowPolicy::Sequential);
        let plan = ExecutionPlan::new(&sequential, 25_000);
        assert_eq!(plan.group_sizes(), vec![1; 25]);
        assert_eq!(plan.peak_concurrency(), 1);
    }

    #[test]
    fn test_plan_scenario_c_fast_path() {
        let plan = ExecutionPlan::new(&config(ExecutionStrategy::Sequential), 500);
        assert_eq!(plan.strategy, ResolvedStrategy::Direct);
        assert_eq!(plan.batch_count, 1);
        assert_eq!(plan.batch_sizes(), vec![500]);
    }

    #[test]
    fn test_forced_parallel_flags_ceiling_overrun() {
        let plan = ExecutionPlan::new(&config(ExecutionStrategy::Parallel), 25_000);
        assert_eq!(plan.peak_concurrency(), 25);
        assert!(plan.exceeds_ceiling());
    }

    #[test]
    fn test_empty_plan() {
        let plan = ExecutionPlan::new(&BatchConfig::default(), 0);
        assert_eq!(plan.batch_count, 0);
        assert!(plan.batch_sizes().is_empty());
        assert!(plan.group_sizes().is_empty());
        assert_eq!(plan.peak_concurrency(), 0);
    }
}
