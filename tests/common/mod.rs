//! Shared helpers for orchestration integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Error returned by [`LookupRecorder`] when a batch is configured to fail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lookup failed for batch starting at id {first_id}")]
pub struct LookupError {
    pub first_id: u64,
}

#[derive(Debug, Default)]
struct RecorderState {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    completed: AtomicUsize,
    calls: Mutex<Vec<Vec<u64>>>,
    /// Calls started while at least one other call was in flight share a wave
    waves: Mutex<Vec<usize>>,
}

/// Instrumented lookup that records every invocation
///
/// Echoes its batch back after `delay`. Tracks call order, batch contents,
/// peak in-flight count and dispatch waves.
#[derive(Debug, Clone, Default)]
pub struct LookupRecorder {
    delay: Duration,
    fail_on_first_id: Option<u64>,
    state: Arc<RecorderState>,
}

impl LookupRecorder {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(5),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the batch whose first id is `first_id`
    pub fn failing_at(mut self, first_id: u64) -> Self {
        self.fail_on_first_id = Some(first_id);
        self
    }

    pub async fn lookup(&self, batch: Vec<u64>) -> Result<Vec<u64>, LookupError> {
        self.begin(&batch);
        tokio::time::sleep(self.delay).await;
        self.end();

        match (batch.first().copied(), self.fail_on_first_id) {
            (Some(first_id), Some(failing)) if first_id == failing => Err(LookupError { first_id }),
            _ => Ok(batch),
        }
    }

    fn begin(&self, batch: &[u64]) {
        let mut waves = self.state.waves.lock().unwrap();
        let before = self.state.in_flight.fetch_add(1, Ordering::SeqCst);
        if before == 0 {
            waves.push(1);
        } else if let Some(current) = waves.last_mut() {
            *current += 1;
        }
        self.state
            .peak_in_flight
            .fetch_max(before + 1, Ordering::SeqCst);
        self.state.calls.lock().unwrap().push(batch.to_vec());
    }

    fn end(&self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.state.completed.fetch_add(1, Ordering::SeqCst);
    }

    /// Batches in the order their lookups started
    pub fn calls(&self) -> Vec<Vec<u64>> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    /// Batch sizes ordered by the first id of each batch
    pub fn batch_sizes(&self) -> Vec<usize> {
        let mut calls = self.calls();
        calls.sort_by_key(|batch| batch.first().copied());
        calls.iter().map(Vec::len).collect()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.state.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.state.completed.load(Ordering::SeqCst)
    }

    /// Number of calls started in each dispatch wave
    pub fn waves(&self) -> Vec<usize> {
        self.state.waves.lock().unwrap().clone()
    }
}

pub fn ids(count: u64) -> Vec<u64> {
    (0..count).collect()
}
