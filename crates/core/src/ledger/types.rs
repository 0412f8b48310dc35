//! Journal entry domain types.
//!
//! A journal entry is one balanced accounting record: an ordered list of
//! debit and credit lines plus the lifecycle state that governs when those
//! lines become part of the immutable ledger.

use chrono::{DateTime, NaiveDate, Utc};
use hearth_shared::types::{AccountId, FiscalPeriodId, JournalEntryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::LedgerError;
use crate::accounts::AccountRole;
use crate::workflow::AuditRecord;

/// Side of a posting: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit leg.
    Debit,
    /// Credit leg.
    Credit,
}

impl EntrySide {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Journal entry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEntryType {
    /// Entry generated from a business event.
    Standard,
    /// Mirror image of a posted entry.
    Reversal,
    /// Manual correction.
    Adjustment,
}

/// Journal entry status in the approval lifecycle.
///
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Approved → Posted (post)
/// - Draft | Submitted → Rejected (reject)
/// - Posted → Reversed (reverse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryStatus {
    /// Entry is being drafted.
    Draft,
    /// Entry has been submitted for approval.
    Submitted,
    /// Entry has been approved and is ready for posting.
    Approved,
    /// Entry is part of the ledger (immutable).
    Posted,
    /// Entry was turned down before posting.
    Rejected,
    /// Entry was neutralized by a reversal entry.
    Reversed,
}

impl JournalEntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Rejected => "rejected",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "posted" => Some(Self::Posted),
            "rejected" => Some(Self::Rejected),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Returns true if the entry's lines have reached the ledger.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Reversed)
    }
}

impl fmt::Display for JournalEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (role, side, amount) instruction that becomes a journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Semantic account role, resolved through the chart of accounts.
    pub role: AccountRole,
    /// Debit or credit.
    pub side: EntrySide,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional line memo.
    pub description: Option<String>,
}

impl Posting {
    /// A debit posting.
    #[must_use]
    pub fn debit(role: AccountRole, amount: Decimal) -> Self {
        Self {
            role,
            side: EntrySide::Debit,
            amount,
            description: None,
        }
    }

    /// A credit posting.
    #[must_use]
    pub fn credit(role: AccountRole, amount: Decimal) -> Self {
        Self {
            role,
            side: EntrySide::Credit,
            amount,
            description: None,
        }
    }

    /// Attaches a line memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for building a new journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    /// Entry narrative.
    pub description: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Financial period the entry belongs to.
    pub financial_period_id: FiscalPeriodId,
    /// Classification.
    pub entry_type: JournalEntryType,
    /// True when raised by an adapter rather than keyed in by a person.
    pub is_system_generated: bool,
    /// Actor creating the entry.
    pub created_by: UserId,
    /// Postings in display order.
    pub postings: Vec<Posting>,
}

impl NewJournalEntry {
    /// A standard, manually created entry with no postings yet.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        entry_date: NaiveDate,
        financial_period_id: FiscalPeriodId,
        created_by: UserId,
    ) -> Self {
        Self {
            description: description.into(),
            entry_date,
            financial_period_id,
            entry_type: JournalEntryType::Standard,
            is_system_generated: false,
            created_by,
            postings: Vec::new(),
        }
    }

    /// Sets the entry type.
    #[must_use]
    pub fn entry_type(mut self, entry_type: JournalEntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Marks the entry as raised by an adapter.
    #[must_use]
    pub fn system_generated(mut self) -> Self {
        self.is_system_generated = true;
        self
    }

    /// Appends one posting.
    #[must_use]
    pub fn posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Appends postings in order.
    #[must_use]
    pub fn postings(mut self, postings: impl IntoIterator<Item = Posting>) -> Self {
        self.postings.extend(postings);
        self
    }
}

/// One debit or credit leg of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    /// Ledger account.
    pub account_id: AccountId,
    /// Role the account was resolved from.
    pub role: AccountRole,
    /// Debit amount; zero on credit lines.
    pub debit_amount: Decimal,
    /// Credit amount; zero on debit lines.
    pub credit_amount: Decimal,
    /// Optional line memo.
    pub description: Option<String>,
    /// Actor who created the line.
    pub created_by: UserId,
}

impl JournalEntryLine {
    /// The side this line posts to, or `None` if the line is malformed
    /// (both or neither amounts positive).
    #[must_use]
    pub fn side(&self) -> Option<EntrySide> {
        match (
            self.debit_amount > Decimal::ZERO,
            self.credit_amount > Decimal::ZERO,
        ) {
            (true, false) => Some(EntrySide::Debit),
            (false, true) => Some(EntrySide::Credit),
            _ => None,
        }
    }

    /// The line's non-zero amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.debit_amount.max(self.credit_amount)
    }
}

/// A journal entry and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Entry narrative.
    pub description: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Classification.
    pub entry_type: JournalEntryType,
    /// Financial period.
    pub financial_period_id: FiscalPeriodId,
    /// True when raised by an adapter.
    pub is_system_generated: bool,
    /// Actor who created the entry.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: JournalEntryStatus,
    /// Optimistic concurrency token; 1 for a new draft, +1 per transition.
    pub version: u64,
    /// Lines in insertion order.
    pub lines: Vec<JournalEntryLine>,
    /// For a reversal entry, the entry it neutralizes.
    pub reverses: Option<JournalEntryId>,
    /// For a reversed entry, the reversal that neutralized it.
    pub reversed_by: Option<JournalEntryId>,
    /// Reason recorded on rejection.
    pub rejection_reason: Option<String>,
    /// Append-only record of every transition.
    pub audit_trail: Vec<AuditRecord>,
}

impl JournalEntry {
    /// Debit and credit totals over all lines.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if either side sums past `Decimal::MAX`.
    pub fn totals(&self) -> Result<EntryTotals, LedgerError> {
        let (total_debit, total_credit) = self.lines.iter().try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(dr, cr), line| {
                Some((
                    dr.checked_add(line.debit_amount)?,
                    cr.checked_add(line.credit_amount)?,
                ))
            },
        )
        .ok_or(LedgerError::AmountOverflow)?;
        Ok(EntryTotals {
            total_debit,
            total_credit,
            line_count: self.lines.len(),
        })
    }
}

/// Debit and credit totals of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Number of lines.
    pub line_count: usize,
}

impl EntryTotals {
    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}
