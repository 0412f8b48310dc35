//! Journal entry state machine.
//!
//! Transitions are pure: each takes the current entry and returns the next
//! version of it, leaving the input untouched. The caller persists the
//! result; if that write fails, the returned value is simply dropped.

use chrono::{NaiveDate, Utc};
use hearth_shared::types::UserId;

use super::error::WorkflowError;
use super::reversal::{ReversalOutcome, mirror_entry};
use super::types::{AuditRecord, WorkflowAction};
use crate::ledger::{JournalEntry, JournalEntryBuilder, JournalEntryStatus};

/// Stateless lifecycle for journal entries.
///
/// All methods are associated functions that validate a transition and
/// return the updated entry with its version bumped and an audit record
/// appended.
pub struct JournalEntryLifecycle;

impl JournalEntryLifecycle {
    /// Submit a draft entry for approval.
    ///
    /// # Errors
    /// * `InvalidTransition` if not in Draft status
    /// * `Ledger` if the entry no longer validates
    pub fn submit(entry: &JournalEntry, actor: UserId) -> Result<JournalEntry, WorkflowError> {
        Self::require(entry, WorkflowAction::Submit)?;
        JournalEntryBuilder::validate(entry)?;
        Ok(Self::apply(entry, WorkflowAction::Submit, actor, None))
    }

    /// Approve a submitted entry.
    ///
    /// The balance is re-checked here even though submitted lines cannot
    /// change; an unbalanced entry must never reach the ledger.
    ///
    /// # Errors
    /// * `InvalidTransition` if not in Submitted status
    /// * `Ledger(UnbalancedEntry)` if the entry no longer balances
    pub fn approve(entry: &JournalEntry, actor: UserId) -> Result<JournalEntry, WorkflowError> {
        Self::require(entry, WorkflowAction::Approve)?;
        JournalEntryBuilder::validate(entry)?;
        Ok(Self::apply(entry, WorkflowAction::Approve, actor, None))
    }

    /// Post an approved entry to the ledger.
    ///
    /// After this the entry's lines are immutable.
    ///
    /// # Errors
    /// * `InvalidTransition` if not in Approved status
    pub fn post(entry: &JournalEntry, actor: UserId) -> Result<JournalEntry, WorkflowError> {
        Self::require(entry, WorkflowAction::Post)?;
        JournalEntryBuilder::validate(entry)?;
        Ok(Self::apply(entry, WorkflowAction::Post, actor, None))
    }

    /// Reject a draft or submitted entry.
    ///
    /// # Errors
    /// * `RejectionReasonRequired` if `reason` is blank
    /// * `InvalidTransition` if not in Draft or Submitted status
    pub fn reject(
        entry: &JournalEntry,
        actor: UserId,
        reason: &str,
    ) -> Result<JournalEntry, WorkflowError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        Self::require(entry, WorkflowAction::Reject)?;

        let mut rejected = Self::apply(entry, WorkflowAction::Reject, actor, Some(reason));
        rejected.rejection_reason = Some(reason.to_string());
        Ok(rejected)
    }

    /// Reverse a posted entry.
    ///
    /// Returns the original marked `Reversed` (lines untouched) and a new
    /// `Draft` reversal entry whose lines mirror the original's. The caller
    /// drives the reversal through submit, approve and post like any other
    /// entry.
    ///
    /// # Errors
    /// * `ReversalReasonRequired` if `reason` is blank
    /// * `InvalidTransition` if not in Posted status
    pub fn reverse(
        entry: &JournalEntry,
        actor: UserId,
        reason: &str,
        reversal_date: NaiveDate,
    ) -> Result<ReversalOutcome, WorkflowError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::ReversalReasonRequired);
        }
        Self::require(entry, WorkflowAction::Reverse)?;

        let reversal = mirror_entry(entry, actor, reason, reversal_date)?;
        let mut original = Self::apply(entry, WorkflowAction::Reverse, actor, Some(reason));
        original.reversed_by = Some(reversal.id);

        Ok(ReversalOutcome { original, reversal })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Submitted (submit)
    /// - Submitted → Approved (approve)
    /// - Approved → Posted (post)
    /// - Draft → Rejected, Submitted → Rejected (reject)
    /// - Posted → Reversed (reverse)
    #[must_use]
    pub fn is_valid_transition(from: JournalEntryStatus, to: JournalEntryStatus) -> bool {
        use JournalEntryStatus::{Approved, Draft, Posted, Rejected, Reversed, Submitted};

        matches!(
            (from, to),
            (Draft, Submitted | Rejected)
                | (Submitted, Approved | Rejected)
                | (Approved, Posted)
                | (Posted, Reversed)
        )
    }

    fn require(entry: &JournalEntry, action: WorkflowAction) -> Result<(), WorkflowError> {
        let to = action.target_status();
        if Self::is_valid_transition(entry.status, to) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                from: entry.status,
                to,
            })
        }
    }

    fn apply(
        entry: &JournalEntry,
        action: WorkflowAction,
        actor: UserId,
        reason: Option<&str>,
    ) -> JournalEntry {
        let to = action.target_status();
        let mut next = entry.clone();
        next.audit_trail.push(AuditRecord {
            action,
            from: entry.status,
            to,
            actor,
            at: Utc::now(),
            reason: reason.map(str::to_string),
        });
        next.status = to;
        next.version += 1;
        next
    }
}
