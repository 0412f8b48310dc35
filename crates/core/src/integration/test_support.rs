//! In-crate gateway and chart doubles for adapter tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use hearth_shared::types::{AccountId, FiscalPeriodId, JournalEntryId, LoanId, UserId};
use rust_decimal::Decimal;

use super::pipeline::{PostingContext, PostingPipeline};
use crate::accounts::{AccountRole, ChartOfAccounts};
use crate::ledger::JournalEntry;
use crate::loan::{LoanClassification, LoanSnapshot, LoanStatus};
use crate::ports::{GatewayError, LedgerGateway};

#[derive(Default)]
pub(crate) struct MockGateway {
    pub entries: Mutex<HashMap<JournalEntryId, JournalEntry>>,
    pub loans: Mutex<HashMap<LoanId, LoanSnapshot>>,
    pub penalties: Mutex<HashMap<(LoanId, NaiveDate), Decimal>>,
    pub fail_saves: Mutex<bool>,
    /// Saves allowed before every further save fails.
    pub saves_before_failure: Mutex<Option<usize>>,
}

impl MockGateway {
    pub fn add_loan(&self, loan: LoanSnapshot) {
        self.loans.lock().unwrap().insert(loan.loan_id, loan);
    }

    pub fn entry(&self, id: JournalEntryId) -> JournalEntry {
        self.entries.lock().unwrap()[&id].clone()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl LedgerGateway for MockGateway {
    async fn save_entry(&self, entry: &JournalEntry) -> Result<JournalEntryId, GatewayError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(GatewayError::Storage("unavailable".into()));
        }
        if let Some(remaining) = self.saves_before_failure.lock().unwrap().as_mut() {
            if *remaining == 0 {
                return Err(GatewayError::Storage("unavailable".into()));
            }
            *remaining -= 1;
        }
        let mut entries = self.entries.lock().unwrap();
        if entry.version > 1 {
            let stored = entries
                .get(&entry.id)
                .ok_or(GatewayError::EntryNotFound(entry.id))?;
            if stored.version + 1 != entry.version {
                return Err(GatewayError::ConcurrentModification {
                    id: entry.id,
                    expected: entry.version - 1,
                    actual: stored.version,
                });
            }
        }
        entries.insert(entry.id, entry.clone());
        Ok(entry.id)
    }

    async fn load_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, GatewayError> {
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn load_loan_snapshot(&self, loan_id: LoanId) -> Result<Option<LoanSnapshot>, GatewayError> {
        Ok(self.loans.lock().unwrap().get(&loan_id).cloned())
    }

    async fn list_active_loans(&self) -> Result<Vec<LoanSnapshot>, GatewayError> {
        let mut loans: Vec<LoanSnapshot> = self
            .loans
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.status == LoanStatus::Active)
            .cloned()
            .collect();
        loans.sort_by_key(|l| l.loan_id);
        Ok(loans)
    }

    async fn save_loan_classification(
        &self,
        loan_id: LoanId,
        classification: LoanClassification,
    ) -> Result<(), GatewayError> {
        if let Some(loan) = self.loans.lock().unwrap().get_mut(&loan_id) {
            loan.last_classification = Some(classification);
        }
        Ok(())
    }

    async fn record_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<bool, GatewayError> {
        let mut penalties = self.penalties.lock().unwrap();
        if penalties.contains_key(&(loan_id, date)) {
            return Ok(false);
        }
        penalties.insert((loan_id, date), amount);
        Ok(true)
    }

    async fn penalty_applied_since(
        &self,
        loan_id: LoanId,
        after: NaiveDate,
    ) -> Result<Decimal, GatewayError> {
        Ok(self
            .penalties
            .lock()
            .unwrap()
            .iter()
            .filter(|((id, date), _)| *id == loan_id && *date > after)
            .map(|(_, amount)| *amount)
            .sum())
    }

    async fn release_penalty_application(
        &self,
        loan_id: LoanId,
        date: NaiveDate,
    ) -> Result<(), GatewayError> {
        self.penalties.lock().unwrap().remove(&(loan_id, date));
        Ok(())
    }
}

pub(crate) fn full_chart() -> ChartOfAccounts {
    AccountRole::ALL
        .into_iter()
        .map(|role| (role, AccountId::new()))
        .collect()
}

pub(crate) fn pipeline() -> (Arc<MockGateway>, PostingPipeline<MockGateway, ChartOfAccounts>) {
    let gateway = Arc::new(MockGateway::default());
    let pipeline = PostingPipeline::new(Arc::clone(&gateway), Arc::new(full_chart()));
    (gateway, pipeline)
}

pub(crate) fn context() -> PostingContext {
    PostingContext::new(
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        FiscalPeriodId::new(),
        UserId::new(),
    )
}
