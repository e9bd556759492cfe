//! Error type shared by the table, the loader and the report writer.

use std::collections::TryReserveError;
use std::path::PathBuf;

/// Failures surfaced by `TokenTable` and its collaborators.
///
/// Probe overflow is deliberately absent: running out of probe steps is the
/// trigger for chaining on insert and a plain "not found" on lookup.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("unable to allocate storage for a new entry ({requested} bytes)")]
    Allocation { requested: usize },

    #[error("empty tokens cannot be indexed")]
    EmptyKey,

    #[error("table must have at least one slot (got {slots})")]
    InvalidCapacity { slots: usize },

    #[error("can't open input file {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub(crate) fn allocation(requested: usize) -> impl FnOnce(TryReserveError) -> Self {
        move |_| IndexError::Allocation { requested }
    }

    /// Allocation failures abort the operation; the host decides what happens next.
    pub fn is_fatal(&self) -> bool {
        matches!(self, IndexError::Allocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
