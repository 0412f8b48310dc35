//! Ledger error types for entry construction and validation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::AccountRole;

/// Errors raised while building or validating a journal entry.
///
/// Line numbers are 1-based positions in the entry's line list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// Line amount is zero (or rounds to zero at the minor unit).
    #[error("Line {line}: amount cannot be zero")]
    ZeroAmount {
        /// Offending line.
        line: usize,
    },

    /// Line amount is negative.
    #[error("Line {line}: amount cannot be negative")]
    NegativeAmount {
        /// Offending line.
        line: usize,
    },

    /// Line carries both a debit and a credit.
    #[error("Line {line}: must carry either a debit or a credit, not both")]
    InvalidLine {
        /// Offending line.
        line: usize,
    },

    /// Line amount has more decimal places than the currency allows.
    #[error("Line {line}: amount {amount} exceeds minor-unit precision")]
    ExcessPrecision {
        /// Offending line.
        line: usize,
        /// The amount as supplied.
        amount: Decimal,
    },

    /// Line amounts sum past the range of `Decimal`.
    #[error("Journal entry totals overflow")]
    AmountOverflow,

    /// Entry description is blank.
    #[error("Journal entry description is required")]
    MissingDescription,

    // ========== Account Errors ==========
    /// No ledger account is mapped to the role.
    #[error("No account mapped for role '{0}'")]
    AccountNotFound(AccountRole),

    // ========== Balance Errors ==========
    /// Total debits differ from total credits.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::InvalidLine { .. } => "INVALID_LINE",
            Self::ExcessPrecision { .. } => "EXCESS_PRECISION",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - caller supplied a bad posting
            Self::InsufficientLines { .. }
            | Self::ZeroAmount { .. }
            | Self::NegativeAmount { .. }
            | Self::InvalidLine { .. }
            | Self::ExcessPrecision { .. }
            | Self::AmountOverflow
            | Self::MissingDescription => 400,

            // 500 - unmapped roles are a deployment problem, unbalanced
            // entries are an adapter defect
            Self::AccountNotFound(_) | Self::UnbalancedEntry { .. } => 500,
        }
    }

    /// Returns true if the error indicates a defect rather than bad input.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::UnbalancedEntry { .. })
    }
}
