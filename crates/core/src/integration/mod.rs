//! Accounting integration adapters.
//!
//! Each adapter turns one kind of business event into postings and drives
//! the resulting entry through the posting pipeline. Every operation takes
//! an explicit actor through [`PostingContext`].
//!
//! - `pipeline` - Build, validate, and transition entries through the gateway
//! - `banking` - Deposits, withdrawals, transfers
//! - `loan` - Disbursements, repayments, write-offs, penalties
//! - `payroll` - Payroll runs
//! - `fixed_asset` - Acquisitions, depreciation, disposals
//! - `delinquency` - Delinquency checks over stored loans
//! - `error` - Adapter errors and their caller-facing categories

pub mod banking;
pub mod delinquency;
pub mod error;
pub mod fixed_asset;
pub mod loan;
pub mod payroll;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use banking::BankingAdapter;
pub use delinquency::DelinquencyService;
pub use error::{ErrorKind, IntegrationError};
pub use fixed_asset::{
    AssetDisposal, DisposalRecorded, FixedAssetAdapter, straight_line_monthly_depreciation,
};
pub use loan::{LoanAdapter, RepaymentRecorded};
pub use payroll::{PayrollAdapter, PayrollRun};
pub use pipeline::{PostingContext, PostingPipeline};
