//! Loan money math and delinquency.
//!
//! - `amortization` - EMI, reducing-balance schedules, penalties, payoff quotes
//! - `allocation` - Penalty, interest, principal payment waterfall
//! - `delinquency` - Days-past-due classification and the daily batch
//! - `types` - Loan value types
//! - `error` - Loan calculation errors

pub mod allocation;
pub mod amortization;
pub mod delinquency;
pub mod error;
pub mod types;

#[cfg(test)]
mod allocation_props;
#[cfg(test)]
mod amortization_props;

pub use allocation::PaymentAllocationEngine;
pub use amortization::{AmortizationCalculator, DAYS_IN_YEAR};
pub use delinquency::DelinquencyClassifier;
pub use error::LoanError;
pub use types::{
    AmortizationInstallment, DailyDelinquencyReport, DelinquencyStatus, EarlyRepaymentQuote,
    LoanClassification, LoanSnapshot, LoanStatus, LoanTerms, PaymentAllocation,
    ScheduledInstallment,
};
