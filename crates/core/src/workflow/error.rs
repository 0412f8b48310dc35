//! Workflow error types for the journal entry lifecycle.

use thiserror::Error;

use crate::ledger::{JournalEntryStatus, LedgerError};

/// Errors that can occur during lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: JournalEntryStatus,
        /// The attempted target status.
        to: JournalEntryStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Reversal reason is required but not provided.
    #[error("Reversal reason is required")]
    ReversalReasonRequired,

    /// The entry failed re-validation during the transition.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::RejectionReasonRequired
            | Self::ReversalReasonRequired => 400,
            Self::Ledger(err) => err.http_status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::ReversalReasonRequired => "REVERSAL_REASON_REQUIRED",
            Self::Ledger(err) => err.error_code(),
        }
    }
}
