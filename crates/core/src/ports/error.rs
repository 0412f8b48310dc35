//! Persistence gateway errors.

use hearth_shared::types::JournalEntryId;
use thiserror::Error;

/// Errors reported by a [`LedgerGateway`](super::LedgerGateway) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A transition was saved for an entry the store has never seen.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// The stored version is not the one the transition was computed from.
    #[error("Concurrent modification of journal entry {id}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        /// The entry.
        id: JournalEntryId,
        /// Version the caller expected to replace.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EntryNotFound(_) => 404,
            Self::ConcurrentModification { .. } => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Returns true if reloading and retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}
