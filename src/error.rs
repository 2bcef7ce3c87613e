//! Error types for the runtime.

use std::collections::TryReserveError;
use thiserror::Error;

/// The error type for every fallible operation in this crate.
///
/// Absence (a lookup miss, removing a handle that is not stored) is never
/// reported here; those operations return `Option`/`bool`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Growing backing storage failed.
    #[error("allocation failed while {context}")]
    AllocationFailure {
        context: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// The stream cipher needs at least one key byte.
    #[error("cipher key must not be empty")]
    EmptyKey,

    /// Splitting on an empty delimiter has no meaningful result.
    #[error("split delimiter must not be empty")]
    EmptyDelimiter,

    /// An option string named something that is not a known option.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

impl RuntimeError {
    pub(crate) fn alloc(context: &'static str, source: TryReserveError) -> Self {
        RuntimeError::AllocationFailure { context, source }
    }
}

/// A convenience `Result` alias using [`RuntimeError`].
pub type Result<T> = std::result::Result<T, RuntimeError>;
