//! Error types for header storage.

use thiserror::Error;

/// Errors that may occur while storing or retrieving block headers.
///
/// Every failure is surfaced to the immediate caller; the store never retries
/// and never partially applies a write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The header could not be serialized for storage.
    #[error("failed to encode header: {0}")]
    Encode(String),

    /// The stored bytes do not decode to a valid header. Distinct from
    /// [`Self::HeaderNotFound`] so callers can tell "missing" from "corrupt".
    #[error("failed to decode header: {0}")]
    Decode(#[source] alloy_rlp::Error),

    /// No header is stored for the requested height.
    #[error("header not found for height {number}")]
    HeaderNotFound {
        /// The height that was queried, after clamping.
        number: u64,
    },

    /// The versioned store could not produce a snapshot view.
    #[error("failed to open query context: {0}")]
    QueryContext(#[from] QueryContextError),

    /// The decoded header's number differs from the requested height. This
    /// signals drift between the key scheme and the versioned store and is
    /// never silently corrected.
    #[error("header number mismatch: expected {expected}, found {found}")]
    HeaderMismatch {
        /// The height that was requested, after clamping.
        expected: u64,
        /// The number embedded in the decoded header.
        found: u64,
    },
}

/// Failures reported by the versioned store adapter when asked to open a
/// snapshot view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryContextError {
    /// The snapshot for the requested height has been discarded.
    #[error("height {height} has been pruned, earliest retained height is {earliest}")]
    Pruned {
        /// The height that was requested.
        height: u64,
        /// The earliest height the store still retains.
        earliest: u64,
    },

    /// The adapter could not serve the request, e.g. it is misconfigured,
    /// shutting down, or the caller's context was cancelled.
    #[error("versioned store unavailable: {0}")]
    Unavailable(String),
}
