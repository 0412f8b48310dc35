//! Workflow domain types for the journal entry lifecycle.

use chrono::{DateTime, Utc};
use hearth_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::JournalEntryStatus;

/// Lifecycle event applied to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowAction {
    /// Draft → Submitted.
    Submit,
    /// Submitted → Approved.
    Approve,
    /// Approved → Posted.
    Post,
    /// Draft | Submitted → Rejected.
    Reject,
    /// Posted → Reversed.
    Reverse,
}

impl WorkflowAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Post => "post",
            Self::Reject => "reject",
            Self::Reverse => "reverse",
        }
    }

    /// The status an entry lands in after this action.
    #[must_use]
    pub fn target_status(&self) -> JournalEntryStatus {
        match self {
            Self::Submit => JournalEntryStatus::Submitted,
            Self::Approve => JournalEntryStatus::Approved,
            Self::Post => JournalEntryStatus::Posted,
            Self::Reject => JournalEntryStatus::Rejected,
            Self::Reverse => JournalEntryStatus::Reversed,
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a journal entry's append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Action performed.
    pub action: WorkflowAction,
    /// Status before the action.
    pub from: JournalEntryStatus,
    /// Status after the action.
    pub to: JournalEntryStatus,
    /// Who performed it.
    pub actor: UserId,
    /// When it was performed.
    pub at: DateTime<Utc>,
    /// Reason, for rejections and reversals.
    pub reason: Option<String>,
}
