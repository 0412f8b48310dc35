//! Property-based tests for journal entry construction.

use chrono::NaiveDate;
use hearth_shared::types::{AccountId, FiscalPeriodId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::builder::JournalEntryBuilder;
use super::error::LedgerError;
use super::types::{NewJournalEntry, Posting};
use crate::accounts::{AccountRole, ChartOfAccounts};

/// Strategy to generate a valid positive amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn role_strategy() -> impl Strategy<Value = AccountRole> {
    prop::sample::select(AccountRole::ALL.to_vec())
}

fn full_chart() -> ChartOfAccounts {
    AccountRole::ALL
        .into_iter()
        .map(|role| (role, AccountId::new()))
        .collect()
}

fn new_entry(postings: Vec<Posting>) -> NewJournalEntry {
    NewJournalEntry::new(
        "Generated entry",
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        FiscalPeriodId::new(),
        UserId::new(),
    )
    .postings(postings)
}

/// Debit legs with arbitrary amounts, balanced by credit legs that split the
/// same total differently.
fn balanced_postings() -> impl Strategy<Value = Vec<Posting>> {
    (
        prop::collection::vec((role_strategy(), positive_amount()), 1..6),
        prop::collection::vec(role_strategy(), 1..4),
    )
        .prop_map(|(debits, credit_roles)| {
            let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
            let mut postings: Vec<Posting> = debits
                .into_iter()
                .map(|(role, amount)| Posting::debit(role, amount))
                .collect();

            // Split the total into one-cent-granular shares; the last credit
            // takes the remainder so the sum is exact.
            let cents = total * Decimal::ONE_HUNDRED;
            let share = (cents / Decimal::from(credit_roles.len())).floor() / Decimal::ONE_HUNDRED;
            let mut remaining = total;
            for (i, role) in credit_roles.iter().enumerate() {
                let amount = if i + 1 == credit_roles.len() || share.is_zero() {
                    remaining
                } else {
                    share
                };
                if amount.is_zero() {
                    continue;
                }
                postings.push(Posting::credit(*role, amount));
                remaining -= amount;
            }
            postings
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Every entry that builds is balanced.
    ///
    /// *For any* postings that balance, `build` succeeds and `validate`
    /// reports equal debit and credit totals.
    #[test]
    fn prop_built_entries_balance(postings in balanced_postings()) {
        let chart = full_chart();
        let count = postings.len();
        let entry = JournalEntryBuilder::build(new_entry(postings), &chart).unwrap();

        let totals = JournalEntryBuilder::validate(&entry).unwrap();
        prop_assert_eq!(totals.total_debit, totals.total_credit);
        prop_assert_eq!(totals.line_count, count);
        for line in &entry.lines {
            prop_assert!(line.side().is_some());
        }
    }

    /// Property 2: Any imbalance is rejected.
    ///
    /// *For any* balanced postings, skewing one debit by a positive amount
    /// makes `build` fail with `UnbalancedEntry`.
    #[test]
    fn prop_skewed_entries_rejected(
        postings in balanced_postings(),
        skew in positive_amount(),
    ) {
        let mut postings = postings;
        postings[0].amount += skew;

        let result = JournalEntryBuilder::build(new_entry(postings), &full_chart());
        prop_assert!(
            matches!(result, Err(LedgerError::UnbalancedEntry { .. })),
            "Skewed entry should be unbalanced, got: {:?}",
            result
        );
    }

    /// Property 3: Single posting entries are rejected.
    #[test]
    fn prop_single_posting_rejected(role in role_strategy(), amount in positive_amount()) {
        let result = JournalEntryBuilder::build(
            new_entry(vec![Posting::debit(role, amount)]),
            &full_chart(),
        );
        prop_assert_eq!(result, Err(LedgerError::InsufficientLines { count: 1 }));
    }
}
