//! Build, validate and post journal entries through the gateway.
//!
//! Each lifecycle transition is one `save_entry` call. The transition is
//! computed on a copy; if the save fails, the copy is dropped and the
//! stored entry remains the last durable state.

use std::sync::Arc;

use chrono::NaiveDate;
use hearth_shared::types::{FiscalPeriodId, JournalEntryId, UserId};
use tracing::{debug, error, info, warn};

use super::error::IntegrationError;
use crate::accounts::ChartOfAccountResolver;
use crate::ledger::{
    JournalEntry, JournalEntryBuilder, JournalEntryStatus, LedgerError, NewJournalEntry, Posting,
};
use crate::ports::LedgerGateway;
use crate::workflow::{JournalEntryLifecycle, WorkflowError};

/// Who is posting, and when and where the entry lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingContext {
    /// Accounting date of the entry.
    pub entry_date: NaiveDate,
    /// Financial period of the entry.
    pub financial_period_id: FiscalPeriodId,
    /// Actor recorded on the entry and every transition.
    pub actor: UserId,
}

impl PostingContext {
    /// Creates a posting context.
    #[must_use]
    pub fn new(entry_date: NaiveDate, financial_period_id: FiscalPeriodId, actor: UserId) -> Self {
        Self {
            entry_date,
            financial_period_id,
            actor,
        }
    }

    /// A system-generated entry carrying `postings`.
    pub(crate) fn entry(
        &self,
        description: impl Into<String>,
        postings: impl IntoIterator<Item = Posting>,
    ) -> NewJournalEntry {
        NewJournalEntry::new(
            description,
            self.entry_date,
            self.financial_period_id,
            self.actor,
        )
        .system_generated()
        .postings(postings)
    }
}

/// Drives entries from postings to the ledger.
pub struct PostingPipeline<G, R> {
    gateway: Arc<G>,
    chart: Arc<R>,
}

impl<G, R> Clone for PostingPipeline<G, R> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            chart: Arc::clone(&self.chart),
        }
    }
}

impl<G: LedgerGateway, R: ChartOfAccountResolver> PostingPipeline<G, R> {
    /// Create a pipeline over a gateway and a chart of accounts.
    #[must_use]
    pub fn new(gateway: Arc<G>, chart: Arc<R>) -> Self {
        Self { gateway, chart }
    }

    /// The persistence gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// The chart of accounts.
    #[must_use]
    pub fn chart(&self) -> &Arc<R> {
        &self.chart
    }

    /// Build an entry, save it as a draft, and drive it to `Posted`.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Transitions already saved stay saved;
    /// the entry can be picked up by ID from its last durable state.
    pub async fn record(
        &self,
        input: NewJournalEntry,
        actor: UserId,
    ) -> Result<JournalEntryId, IntegrationError> {
        let draft = self.create_draft(input).await?;
        self.advance_to_posted(draft, actor).await
    }

    /// Build an entry and save it as a draft.
    pub async fn create_draft(
        &self,
        input: NewJournalEntry,
    ) -> Result<JournalEntry, IntegrationError> {
        let description = input.description.clone();
        let draft = JournalEntryBuilder::build(input, &*self.chart).inspect_err(|e| {
            if e.is_defect() {
                error!(error = %e, description = %description, "Adapter produced unbalanced entry");
            }
        })?;

        self.gateway.save_entry(&draft).await?;
        debug!(entry_id = %draft.id, lines = draft.lines.len(), "Draft journal entry saved");
        Ok(draft)
    }

    /// Submit a stored entry for approval.
    pub async fn submit(
        &self,
        id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntry, IntegrationError> {
        let entry = self.load(id).await?;
        self.save(JournalEntryLifecycle::submit(&entry, actor)).await
    }

    /// Approve a stored entry.
    pub async fn approve(
        &self,
        id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntry, IntegrationError> {
        let entry = self.load(id).await?;
        self.save(JournalEntryLifecycle::approve(&entry, actor)).await
    }

    /// Post a stored entry.
    pub async fn post(
        &self,
        id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntry, IntegrationError> {
        let entry = self.load(id).await?;
        let posted = self.save(JournalEntryLifecycle::post(&entry, actor)).await?;
        info!(entry_id = %posted.id, actor = %actor, "Journal entry posted");
        Ok(posted)
    }

    /// Reject a stored entry.
    pub async fn reject(
        &self,
        id: JournalEntryId,
        actor: UserId,
        reason: &str,
    ) -> Result<JournalEntry, IntegrationError> {
        let entry = self.load(id).await?;
        let rejected = self
            .save(JournalEntryLifecycle::reject(&entry, actor, reason))
            .await?;
        info!(entry_id = %id, actor = %actor, reason = %reason, "Journal entry rejected");
        Ok(rejected)
    }

    /// Reverse a posted entry and post the mirror entry.
    ///
    /// The mirror is saved as a draft, then the original is marked
    /// `Reversed`. That write is the claim: if two callers race, the loser
    /// gets `ConcurrentModification` and its unreferenced draft is rejected.
    /// Only then is the mirror driven to `Posted`.
    ///
    /// If an earlier call claimed the original but failed before the mirror
    /// was posted, calling again finishes posting that same mirror and
    /// returns its ID. Reversing an entry whose mirror is already posted is
    /// an `InvalidTransition`.
    pub async fn reverse(
        &self,
        id: JournalEntryId,
        actor: UserId,
        reason: &str,
        reversal_date: NaiveDate,
    ) -> Result<JournalEntryId, IntegrationError> {
        let entry = self.load(id).await?;
        if let Some(reversal_id) = entry.reversed_by {
            return self.resume_reversal(&entry, reversal_id, actor).await;
        }

        let outcome = JournalEntryLifecycle::reverse(&entry, actor, reason, reversal_date)?;
        self.gateway.save_entry(&outcome.reversal).await?;
        if let Err(err) = self.gateway.save_entry(&outcome.original).await {
            self.discard_reversal(&outcome.reversal, actor).await;
            return Err(err.into());
        }
        let reversal_id = self.advance_to_posted(outcome.reversal, actor).await?;

        info!(
            entry_id = %id,
            reversal_id = %reversal_id,
            actor = %actor,
            "Journal entry reversed"
        );
        Ok(reversal_id)
    }

    async fn resume_reversal(
        &self,
        original: &JournalEntry,
        reversal_id: JournalEntryId,
        actor: UserId,
    ) -> Result<JournalEntryId, IntegrationError> {
        let reversal = self.load(reversal_id).await?;
        if reversal.status == JournalEntryStatus::Posted {
            return Err(WorkflowError::InvalidTransition {
                from: original.status,
                to: JournalEntryStatus::Reversed,
            }
            .into());
        }

        warn!(
            entry_id = %original.id,
            reversal_id = %reversal_id,
            status = %reversal.status,
            "Resuming interrupted reversal"
        );
        let reversal_id = self.advance_to_posted(reversal, actor).await?;
        info!(entry_id = %original.id, reversal_id = %reversal_id, "Journal entry reversed");
        Ok(reversal_id)
    }

    /// Reject a mirror draft that lost the claim on its original.
    async fn discard_reversal(&self, draft: &JournalEntry, actor: UserId) {
        let rejected = JournalEntryLifecycle::reject(draft, actor, "Reversal superseded");
        if let Err(err) = self.save(rejected).await {
            warn!(entry_id = %draft.id, error = %err, "Failed to discard reversal draft");
        }
    }

    /// Apply the remaining transitions until the entry is `Posted`.
    async fn advance_to_posted(
        &self,
        mut entry: JournalEntry,
        actor: UserId,
    ) -> Result<JournalEntryId, IntegrationError> {
        while entry.status != JournalEntryStatus::Posted {
            let next = match entry.status {
                JournalEntryStatus::Draft => JournalEntryLifecycle::submit(&entry, actor),
                JournalEntryStatus::Submitted => JournalEntryLifecycle::approve(&entry, actor),
                _ => JournalEntryLifecycle::post(&entry, actor),
            };
            entry = self.save(next).await?;
        }

        info!(
            entry_id = %entry.id,
            actor = %actor,
            description = %entry.description,
            "Journal entry posted"
        );
        Ok(entry.id)
    }

    async fn load(&self, id: JournalEntryId) -> Result<JournalEntry, IntegrationError> {
        self.gateway
            .load_entry(id)
            .await?
            .ok_or(IntegrationError::EntryNotFound(id))
    }

    async fn save(
        &self,
        transition: Result<JournalEntry, WorkflowError>,
    ) -> Result<JournalEntry, IntegrationError> {
        let next = transition.inspect_err(|e| {
            if let WorkflowError::Ledger(LedgerError::UnbalancedEntry { debit, credit }) = e {
                error!(%debit, %credit, "Unbalanced entry reached the lifecycle");
            }
        })?;

        self.gateway.save_entry(&next).await.inspect_err(|e| {
            warn!(entry_id = %next.id, version = next.version, error = %e, "Failed to save transition");
        })?;
        Ok(next)
    }
}
