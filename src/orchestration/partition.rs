//! Batching step: split an input sequence into contiguous, order-preserving batches.

use crate::config::{ConfigResult, ConfigurationError};

/// A contiguous slice of the input, moved out of the original sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    /// Position of this batch in definition order
    pub index: usize,
    pub items: Vec<T>,
}

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Number of batches `item_count` items split into, i.e. `ceil(item_count / batch_size)`
///
/// Returns [`ConfigurationError::InvalidValue`] when `batch_size` is zero.
pub fn batch_count(item_count: usize, batch_size: usize) -> ConfigResult<usize> {
    ensure_batch_size(batch_size)?;
    Ok(count_batches(item_count, batch_size))
}

/// Partition `items` into batches of `batch_size`; the final batch may be shorter
///
/// Concatenating the returned batches in order reproduces `items` exactly.
/// An empty input yields no batches. A zero `batch_size` is rejected with
/// [`ConfigurationError::InvalidValue`], even for an empty input.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> ConfigResult<Vec<Batch<T>>> {
    ensure_batch_size(batch_size)?;
    Ok(split(items, batch_size))
}

fn ensure_batch_size(batch_size: usize) -> ConfigResult<()> {
    if batch_size == 0 {
        return Err(ConfigurationError::invalid_value(
            "batch_size",
            "0",
            "must be greater than 0",
        ));
    }
    Ok(())
}

/// `batch_size` must be non-zero
pub(crate) fn count_batches(item_count: usize, batch_size: usize) -> usize {
    item_count.div_ceil(batch_size)
}

/// Unchecked partition for sizes already validated by `BatchConfig::validate`
/// or derived from them; `batch_size` must be non-zero
pub(crate) fn split<T>(items: Vec<T>, batch_size: usize) -> Vec<Batch<T>> {
    let mut batches = Vec::with_capacity(count_batches(items.len(), batch_size));
    let mut remaining = items.into_iter().peekable();

    while remaining.peek().is_some() {
        let items: Vec<T> = remaining.by_ref().take(batch_size).collect();
        batches.push(Batch {
            index: batches.len(),
            items,
        });
    }

    batches
}
