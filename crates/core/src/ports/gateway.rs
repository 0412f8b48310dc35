//! Persistence gateway contract.

use std::future::Future;

use chrono::NaiveDate;
use hearth_shared::types::{JournalEntryId, LoanId};
use rust_decimal::Decimal;

use super::error::GatewayError;
use crate::ledger::JournalEntry;
use crate::loan::{LoanClassification, LoanSnapshot};

/// Durable storage for journal entries and loan state.
///
/// Every operation is atomic for a single entity. Implementations serialize
/// transitions on one entry with the entry's `version`:
/// - an entry with `version == 1` is a new draft and is inserted
/// - any other version replaces the stored entry only if the stored version
///   is exactly one less, otherwise `ConcurrentModification`
pub trait LedgerGateway: Send + Sync {
    /// Insert or replace a journal entry under the version rule above.
    fn save_entry(
        &self,
        entry: &JournalEntry,
    ) -> impl Future<Output = Result<JournalEntryId, GatewayError>> + Send;

    /// Load a journal entry by ID.
    fn load_entry(
        &self,
        id: JournalEntryId,
    ) -> impl Future<Output = Result<Option<JournalEntry>, GatewayError>> + Send;

    /// Load the current state of one loan.
    fn load_loan_snapshot(
        &self,
        loan_id: LoanId,
    ) -> impl Future<Output = Result<Option<LoanSnapshot>, GatewayError>> + Send;

    /// All loans whose status is active.
    fn list_active_loans(
        &self,
    ) -> impl Future<Output = Result<Vec<LoanSnapshot>, GatewayError>> + Send;

    /// Record the classification produced by the latest delinquency check.
    fn save_loan_classification(
        &self,
        loan_id: LoanId,
        classification: LoanClassification,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Claim the penalty application for `loan_id` on `date`.
    ///
    /// Returns `false` if a penalty for that loan and date is already
    /// recorded, in which case nothing changes.
    fn record_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
        amount: Decimal,
    ) -> impl Future<Output = Result<bool, GatewayError>> + Send;

    /// Sum of the penalty claims for `loan_id` dated after `after`.
    fn penalty_applied_since(
        &self,
        loan_id: LoanId,
        after: NaiveDate,
    ) -> impl Future<Output = Result<Decimal, GatewayError>> + Send;

    /// Drop a claim made by `record_penalty_application` whose posting failed.
    fn release_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
