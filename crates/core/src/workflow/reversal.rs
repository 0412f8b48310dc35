//! Reversing entries for posted journal entries.
//!
//! A posted entry is never edited. It is neutralized by a new entry whose
//! lines swap every debit for a credit of the same amount on the same
//! account, and vice versa.

use chrono::{NaiveDate, Utc};
use hearth_shared::types::{JournalEntryId, UserId};
use serde::{Deserialize, Serialize};

use crate::ledger::{
    JournalEntry, JournalEntryBuilder, JournalEntryLine, JournalEntryStatus, JournalEntryType,
    LedgerError,
};

/// Result of reversing a posted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalOutcome {
    /// The original, now `Reversed` and linked to the reversal. Its lines
    /// are unchanged.
    pub original: JournalEntry,
    /// The new mirror entry in `Draft`, linked back to the original.
    pub reversal: JournalEntry,
}

/// Build the `Draft` mirror of `original`.
///
/// The mirror is dated `reversal_date`, stays in the original's financial
/// period and is system generated. Line memos are prefixed with "Reversal: ".
pub(crate) fn mirror_entry(
    original: &JournalEntry,
    actor: UserId,
    reason: &str,
    reversal_date: NaiveDate,
) -> Result<JournalEntry, LedgerError> {
    let lines = original
        .lines
        .iter()
        .map(|line| JournalEntryLine {
            account_id: line.account_id,
            role: line.role,
            debit_amount: line.credit_amount,
            credit_amount: line.debit_amount,
            description: Some(format!(
                "Reversal: {}",
                line.description.clone().unwrap_or_default()
            )),
            created_by: actor,
        })
        .collect();

    let mirror = JournalEntry {
        id: JournalEntryId::new(),
        description: format!(
            "Reversal of journal entry {}. Reason: {reason}",
            original.id
        ),
        entry_date: reversal_date,
        entry_type: JournalEntryType::Reversal,
        financial_period_id: original.financial_period_id,
        is_system_generated: true,
        created_by: actor,
        created_at: Utc::now(),
        status: JournalEntryStatus::Draft,
        version: 1,
        lines,
        reverses: Some(original.id),
        reversed_by: None,
        rejection_reason: None,
        audit_trail: Vec::new(),
    };

    JournalEntryBuilder::validate(&mirror)?;
    Ok(mirror)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRole;
    use hearth_shared::types::{AccountId, FiscalPeriodId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn line(role: AccountRole, debit: Decimal, credit: Decimal, memo: Option<&str>) -> JournalEntryLine {
        JournalEntryLine {
            account_id: AccountId::new(),
            role,
            debit_amount: debit,
            credit_amount: credit,
            description: memo.map(str::to_string),
            created_by: UserId::new(),
        }
    }

    fn original() -> JournalEntry {
        JournalEntry {
            id: JournalEntryId::new(),
            description: "Loan repayment".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            entry_type: JournalEntryType::Standard,
            financial_period_id: FiscalPeriodId::new(),
            is_system_generated: true,
            created_by: UserId::new(),
            created_at: Utc::now(),
            status: JournalEntryStatus::Posted,
            version: 4,
            lines: vec![
                line(AccountRole::Cash, dec!(1500), Decimal::ZERO, Some("teller")),
                line(AccountRole::LoansReceivable, Decimal::ZERO, dec!(1200), None),
                line(AccountRole::InterestIncome, Decimal::ZERO, dec!(300), None),
            ],
            reverses: None,
            reversed_by: None,
            rejection_reason: None,
            audit_trail: Vec::new(),
        }
    }

    #[test]
    fn test_mirror_swaps_sides() {
        let original = original();
        let actor = UserId::new();
        let date = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();

        let mirror = mirror_entry(&original, actor, "wrong loan", date).unwrap();

        assert_eq!(mirror.lines.len(), 3);
        assert_eq!(mirror.lines[0].credit_amount, dec!(1500));
        assert_eq!(mirror.lines[0].debit_amount, Decimal::ZERO);
        assert_eq!(mirror.lines[1].debit_amount, dec!(1200));
        assert_eq!(mirror.lines[2].debit_amount, dec!(300));
        assert_eq!(mirror.lines[0].account_id, original.lines[0].account_id);
        assert_eq!(mirror.lines[0].description.as_deref(), Some("Reversal: teller"));
        assert_eq!(mirror.lines[1].description.as_deref(), Some("Reversal: "));
    }

    #[test]
    fn test_mirror_metadata() {
        let original = original();
        let actor = UserId::new();
        let date = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();

        let mirror = mirror_entry(&original, actor, "wrong loan", date).unwrap();

        assert_eq!(mirror.entry_type, JournalEntryType::Reversal);
        assert_eq!(mirror.status, JournalEntryStatus::Draft);
        assert_eq!(mirror.version, 1);
        assert_eq!(mirror.reverses, Some(original.id));
        assert_eq!(mirror.entry_date, date);
        assert_eq!(mirror.financial_period_id, original.financial_period_id);
        assert_eq!(mirror.created_by, actor);
        assert!(mirror.description.contains("wrong loan"));
        assert!(mirror.description.contains(&original.id.to_string()));
    }

    #[test]
    fn test_mirror_totals_match_original() {
        let original = original();
        let mirror =
            mirror_entry(&original, UserId::new(), "dup", original.entry_date).unwrap();

        let o = original.totals().unwrap();
        let m = mirror.totals().unwrap();
        assert_eq!(o.total_debit, m.total_credit);
        assert_eq!(o.total_credit, m.total_debit);
    }
}
