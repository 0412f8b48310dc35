//! Errors surfaced by the accounting adapters.

use hearth_shared::AppError;
use hearth_shared::types::{JournalEntryId, LoanId, MINOR_UNIT_DIGITS, is_minor_unit_precise};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::loan::LoanError;
use crate::ports::GatewayError;
use crate::workflow::WorkflowError;

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied a bad amount or reference; nothing was changed.
    InvalidArgument,
    /// A required account role has no mapping. Needs configuration, not retry.
    AccountNotFound,
    /// An adapter produced an unbalanced entry. Always a defect.
    UnbalancedEntry,
    /// The entry is not in the state the operation requires.
    InvalidTransition,
    /// The persistence gateway failed or rejected a write.
    Persistence,
}

/// Errors returned by adapter operations and the posting pipeline.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// Loan calculation rejected its inputs.
    #[error(transparent)]
    Loan(#[from] LoanError),

    /// Entry construction or validation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Lifecycle transition failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Persistence gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An event argument failed validation.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// Argument name.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Referenced journal entry does not exist.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(JournalEntryId),

    /// Referenced loan does not exist.
    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),
}

impl IntegrationError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// The caller-facing category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ledger(err) | Self::Workflow(WorkflowError::Ledger(err)) => ledger_kind(err),
            Self::Workflow(WorkflowError::InvalidTransition { .. }) => ErrorKind::InvalidTransition,
            Self::Gateway(_) => ErrorKind::Persistence,
            Self::Loan(_)
            | Self::Workflow(
                WorkflowError::RejectionReasonRequired | WorkflowError::ReversalReasonRequired,
            )
            | Self::InvalidArgument { .. }
            | Self::EntryNotFound(_)
            | Self::LoanNotFound(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Loan(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::Workflow(err) => err.error_code(),
            Self::Gateway(err) => err.error_code(),
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::LoanNotFound(_) => "LOAN_NOT_FOUND",
        }
    }

    /// Returns true if the calling orchestration may reload and retry.
    ///
    /// Only optimistic-concurrency conflicts qualify. Calculator and
    /// validation errors are deterministic.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway(err) if err.is_retryable())
    }
}

/// Amounts entering an adapter carry whole minor units. Postings are rounded
/// one by one, so a sub-cent input would round differently on each side.
pub(crate) fn require_minor_units(
    field: &'static str,
    amount: Decimal,
) -> Result<(), IntegrationError> {
    if !is_minor_unit_precise(amount) {
        return Err(IntegrationError::invalid(
            field,
            format!("has more than {MINOR_UNIT_DIGITS} decimal places: {amount}"),
        ));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, amount: Decimal) -> Result<(), IntegrationError> {
    if amount <= Decimal::ZERO {
        return Err(IntegrationError::invalid(
            field,
            format!("must be positive, got {amount}"),
        ));
    }
    require_minor_units(field, amount)
}

pub(crate) fn require_non_negative(
    field: &'static str,
    amount: Decimal,
) -> Result<(), IntegrationError> {
    if amount < Decimal::ZERO {
        return Err(IntegrationError::invalid(
            field,
            format!("cannot be negative, got {amount}"),
        ));
    }
    require_minor_units(field, amount)
}

fn ledger_kind(err: &LedgerError) -> ErrorKind {
    match err {
        LedgerError::AccountNotFound(_) => ErrorKind::AccountNotFound,
        LedgerError::UnbalancedEntry { .. } => ErrorKind::UnbalancedEntry,
        _ => ErrorKind::InvalidArgument,
    }
}

impl From<IntegrationError> for AppError {
    fn from(err: IntegrationError) -> Self {
        let message = err.to_string();
        match (&err, err.kind()) {
            (IntegrationError::EntryNotFound(_) | IntegrationError::LoanNotFound(_), _)
            | (IntegrationError::Gateway(GatewayError::EntryNotFound(_)), _) => {
                Self::NotFound(message)
            }
            (_, ErrorKind::InvalidArgument) => Self::Validation(message),
            (_, ErrorKind::AccountNotFound) => Self::Configuration(message),
            (_, ErrorKind::UnbalancedEntry) => Self::Internal(message),
            (_, ErrorKind::InvalidTransition) => Self::BusinessRule(message),
            (_, ErrorKind::Persistence) if err.is_retryable() => Self::Conflict(message),
            (_, ErrorKind::Persistence) => Self::Storage(message),
        }
    }
}
