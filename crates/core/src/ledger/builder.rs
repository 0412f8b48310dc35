//! Journal entry construction and balance validation.
//!
//! This is the only place lines are created. Every adapter and the reversal
//! path funnel through [`JournalEntryBuilder::build`], so the balance check
//! here is the single gate between business events and the ledger.

use chrono::Utc;
use hearth_shared::types::{JournalEntryId, UserId, is_minor_unit_precise, round_money};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{
    EntrySide, EntryTotals, JournalEntry, JournalEntryLine, JournalEntryStatus, NewJournalEntry,
    Posting,
};
use crate::accounts::ChartOfAccountResolver;

/// Stateless builder for draft journal entries.
pub struct JournalEntryBuilder;

impl JournalEntryBuilder {
    /// Build a balanced `Draft` entry from role-based postings.
    ///
    /// This function performs all validation and resolution steps:
    /// 1. Validates the description is present
    /// 2. Validates minimum postings (at least 2)
    /// 3. Rounds each amount to the minor unit (Banker's Rounding) and
    ///    rejects negative or zero amounts
    /// 4. Resolves each role through the chart of accounts
    /// 5. Validates the balance (debits = credits)
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if any step fails. Nothing is created on error.
    pub fn build(
        input: NewJournalEntry,
        resolver: &impl ChartOfAccountResolver,
    ) -> Result<JournalEntry, LedgerError> {
        if input.description.trim().is_empty() {
            return Err(LedgerError::MissingDescription);
        }
        if input.postings.len() < 2 {
            return Err(LedgerError::InsufficientLines {
                count: input.postings.len(),
            });
        }

        let created_by = input.created_by;
        let lines = input
            .postings
            .into_iter()
            .enumerate()
            .map(|(idx, posting)| Self::line_from_posting(idx + 1, posting, resolver, created_by))
            .collect::<Result<Vec<_>, _>>()?;

        let entry = JournalEntry {
            id: JournalEntryId::new(),
            description: input.description,
            entry_date: input.entry_date,
            entry_type: input.entry_type,
            financial_period_id: input.financial_period_id,
            is_system_generated: input.is_system_generated,
            created_by,
            created_at: Utc::now(),
            status: JournalEntryStatus::Draft,
            version: 1,
            lines,
            reverses: None,
            reversed_by: None,
            rejection_reason: None,
            audit_trail: Vec::new(),
        };

        Self::validate(&entry)?;
        Ok(entry)
    }

    fn line_from_posting(
        line: usize,
        posting: Posting,
        resolver: &impl ChartOfAccountResolver,
        created_by: UserId,
    ) -> Result<JournalEntryLine, LedgerError> {
        if posting.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { line });
        }
        let amount = round_money(posting.amount);
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount { line });
        }

        let account_id = resolver.resolve(posting.role)?;
        let (debit_amount, credit_amount) = match posting.side {
            EntrySide::Debit => (amount, Decimal::ZERO),
            EntrySide::Credit => (Decimal::ZERO, amount),
        };

        Ok(JournalEntryLine {
            account_id,
            role: posting.role,
            debit_amount,
            credit_amount,
            description: posting.description,
            created_by,
        })
    }

    /// Re-check an entry's structure and balance.
    ///
    /// Every line must carry exactly one strictly positive amount at minor-unit
    /// precision, and the debit total must equal the credit total. Callers
    /// run this before any transition out of `Draft`.
    ///
    /// # Errors
    ///
    /// Returns the first structural violation found, in line order,
    /// `AmountOverflow` if a side cannot be summed, or `UnbalancedEntry` if
    /// the lines are well formed but do not balance.
    pub fn validate(entry: &JournalEntry) -> Result<EntryTotals, LedgerError> {
        if entry.lines.len() < 2 {
            return Err(LedgerError::InsufficientLines {
                count: entry.lines.len(),
            });
        }

        for (idx, l) in entry.lines.iter().enumerate() {
            let line = idx + 1;
            if l.debit_amount < Decimal::ZERO || l.credit_amount < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount { line });
            }
            if l.side().is_none() {
                return Err(if l.debit_amount.is_zero() {
                    LedgerError::ZeroAmount { line }
                } else {
                    LedgerError::InvalidLine { line }
                });
            }
            let amount = l.amount();
            if !is_minor_unit_precise(amount) {
                return Err(LedgerError::ExcessPrecision { line, amount });
            }
        }

        let totals = entry.totals()?;
        if !totals.is_balanced() {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok(totals)
    }
}
