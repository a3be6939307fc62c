//! Error types for batch orchestration.
//!

use crate::config::ConfigurationError;
use thiserror::Error;

/// Failures surfaced by a single orchestrated execution.
///
/// `E` is the error type of the caller's lookup. It is carried through
/// untouched so callers can still match on their own failure modes.
#[derive(Debug, Error)]
pub enum BatchError<E> {
    /// A lookup invocation returned an error; the whole execution failed
    #[error("Lookup failed for batch {batch_index} ({batch_len} items): {source}")]
    LookupFailed {
        batch_index: usize,
        batch_len: usize,
        source: E,
    },

    /// The configuration was rejected before any lookup was invoked
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl<E> BatchError<E> {
    pub(crate) fn lookup_failed(batch_index: usize, batch_len: usize, source: E) -> Self {
        Self::LookupFailed {
            batch_index,
            batch_len,
            source,
        }
    }

    /// Index of the batch whose lookup failed, if this is a lookup failure
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            Self::LookupFailed { batch_index, .. } => Some(*batch_index),
            Self::Configuration(_) => None,
        }
    }

    /// Unwrap the caller's own lookup error
    pub fn into_lookup_error(self) -> Option<E> {
        match self {
            Self::LookupFailed { source, .. } => Some(source),
            Self::Configuration(_) => None,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type BatchResult<T, E> = Result<T, BatchError<E>>;
