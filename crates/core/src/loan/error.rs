//! Loan calculation error types.
//!
//! Every variant is an invalid argument supplied by the caller. Calculator
//! errors are deterministic, so none of them is ever retryable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during loan money calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// Principal must be strictly positive.
    #[error("Principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    /// Interest or penalty rate cannot be negative.
    #[error("Rate cannot be negative, got {0}")]
    NegativeRate(Decimal),

    /// Tenor must be at least one month.
    #[error("Tenor must be at least one month")]
    ZeroTenor,

    /// A monetary input cannot be negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Principal already repaid exceeds the original principal.
    #[error("Principal already paid ({paid}) exceeds original principal ({principal})")]
    PaidExceedsPrincipal {
        /// Principal repaid so far.
        paid: Decimal,
        /// Original principal.
        principal: Decimal,
    },

    /// Repayment date precedes the disbursement date.
    #[error("Repayment date {repayment} is before disbursement date {disbursement}")]
    RepaymentBeforeDisbursement {
        /// Disbursement date.
        disbursement: NaiveDate,
        /// Requested repayment date.
        repayment: NaiveDate,
    },

    /// A schedule due date falls outside the supported calendar range.
    #[error("Due date for installment {0} is out of range")]
    DueDateOutOfRange(u32),

    /// Inputs are too large to compute without overflowing decimal precision.
    #[error("Calculation overflow")]
    CalculationOverflow,
}

impl LoanError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositivePrincipal(_) => "NON_POSITIVE_PRINCIPAL",
            Self::NegativeRate(_) => "NEGATIVE_RATE",
            Self::ZeroTenor => "ZERO_TENOR",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::PaidExceedsPrincipal { .. } => "PAID_EXCEEDS_PRINCIPAL",
            Self::RepaymentBeforeDisbursement { .. } => "REPAYMENT_BEFORE_DISBURSEMENT",
            Self::DueDateOutOfRange(_) => "DUE_DATE_OUT_OF_RANGE",
            Self::CalculationOverflow => "CALCULATION_OVERFLOW",
        }
    }
}
