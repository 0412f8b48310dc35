//! In-memory ledger gateway.
//!
//! Entries, loans, and penalty claims live in `DashMap`s. Every write goes
//! through the map's entry API, so the version check and the replacement of
//! one journal entry happen under the same shard lock and two transitions
//! computed from the same stored version cannot both succeed.

use chrono::NaiveDate;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use hearth_core::ledger::{JournalEntry, JournalEntryStatus};
use hearth_core::loan::{LoanClassification, LoanSnapshot};
use hearth_core::ports::{GatewayError, LedgerGateway};
use hearth_shared::types::{JournalEntryId, LoanId};
use rust_decimal::Decimal;
use tracing::debug;

/// Process-local [`LedgerGateway`] backed by concurrent hash maps.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    entries: DashMap<JournalEntryId, JournalEntry>,
    loans: DashMap<LoanId, LoanSnapshot>,
    penalties: DashMap<(LoanId, NaiveDate), Decimal>,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a loan.
    pub fn insert_loan(&self, loan: LoanSnapshot) {
        self.loans.insert(loan.loan_id, loan);
    }

    /// Current state of a loan.
    #[must_use]
    pub fn loan(&self, loan_id: LoanId) -> Option<LoanSnapshot> {
        self.loans.get(&loan_id).map(|loan| loan.clone())
    }

    /// Current state of a journal entry.
    #[must_use]
    pub fn entry(&self, id: JournalEntryId) -> Option<JournalEntry> {
        self.entries.get(&id).map(|entry| entry.clone())
    }

    /// Entries in the given status, oldest first.
    #[must_use]
    pub fn entries_with_status(&self, status: JournalEntryStatus) -> Vec<JournalEntry> {
        let mut entries: Vec<JournalEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.status == status)
            .map(|entry| entry.clone())
            .collect();
        entries.sort_by_key(|entry| (entry.created_at, entry.id));
        entries
    }

    /// Number of stored journal entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Penalty amount claimed for a loan on a date.
    #[must_use]
    pub fn applied_penalty(&self, loan_id: LoanId, date: NaiveDate) -> Option<Decimal> {
        self.penalties.get(&(loan_id, date)).map(|amount| *amount)
    }
}

impl LedgerGateway for InMemoryGateway {
    async fn save_entry(&self, entry: &JournalEntry) -> Result<JournalEntryId, GatewayError> {
        let expected = entry.version.saturating_sub(1);
        match self.entries.entry(entry.id) {
            Entry::Occupied(mut slot) => {
                let actual = slot.get().version;
                if actual != expected {
                    return Err(GatewayError::ConcurrentModification {
                        id: entry.id,
                        expected,
                        actual,
                    });
                }
                slot.insert(entry.clone());
            }
            Entry::Vacant(slot) => {
                if entry.version != 1 {
                    return Err(GatewayError::EntryNotFound(entry.id));
                }
                slot.insert(entry.clone());
            }
        }
        debug!(
            entry_id = %entry.id,
            status = %entry.status,
            version = entry.version,
            "Journal entry saved"
        );
        Ok(entry.id)
    }

    async fn load_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, GatewayError> {
        Ok(self.entry(id))
    }

    async fn load_loan_snapshot(
        &self,
        loan_id: LoanId,
    ) -> Result<Option<LoanSnapshot>, GatewayError> {
        Ok(self.loan(loan_id))
    }

    async fn list_active_loans(&self) -> Result<Vec<LoanSnapshot>, GatewayError> {
        let mut loans: Vec<LoanSnapshot> = self
            .loans
            .iter()
            .filter(|loan| loan.is_active())
            .map(|loan| loan.clone())
            .collect();
        loans.sort_by_key(|loan| loan.loan_id);
        Ok(loans)
    }

    async fn save_loan_classification(
        &self,
        loan_id: LoanId,
        classification: LoanClassification,
    ) -> Result<(), GatewayError> {
        match self.loans.get_mut(&loan_id) {
            Some(mut loan) => {
                loan.last_classification = Some(classification);
                Ok(())
            }
            None => Err(GatewayError::Storage(format!("loan {loan_id} is not stored"))),
        }
    }

    async fn record_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<bool, GatewayError> {
        match self.penalties.entry((loan_id, date)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(amount);
                Ok(true)
            }
        }
    }

    async fn penalty_applied_since(
        &self,
        loan_id: LoanId,
        after: NaiveDate,
    ) -> Result<Decimal, GatewayError> {
        Ok(self
            .penalties
            .iter()
            .filter(|claim| claim.key().0 == loan_id && claim.key().1 > after)
            .map(|claim| *claim.value())
            .sum())
    }

    async fn release_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
    ) -> Result<(), GatewayError> {
        self.penalties.remove(&(loan_id, date));
        Ok(())
    }
}
