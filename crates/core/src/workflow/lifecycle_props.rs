//! Property-based tests for the journal entry state machine.

use chrono::NaiveDate;
use hearth_shared::types::{AccountId, FiscalPeriodId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::WorkflowError;
use super::lifecycle::JournalEntryLifecycle;
use super::types::WorkflowAction;
use crate::accounts::{AccountRole, ChartOfAccounts};
use crate::ledger::{JournalEntry, JournalEntryBuilder, JournalEntryStatus, NewJournalEntry, Posting};

fn action_strategy() -> impl Strategy<Value = WorkflowAction> {
    prop_oneof![
        Just(WorkflowAction::Submit),
        Just(WorkflowAction::Approve),
        Just(WorkflowAction::Post),
        Just(WorkflowAction::Reject),
        Just(WorkflowAction::Reverse),
    ]
}

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn draft(amount: Decimal) -> JournalEntry {
    let chart: ChartOfAccounts = AccountRole::ALL
        .into_iter()
        .map(|role| (role, AccountId::new()))
        .collect();
    JournalEntryBuilder::build(
        NewJournalEntry::new(
            "Deposit",
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            FiscalPeriodId::new(),
            UserId::new(),
        )
        .posting(Posting::debit(AccountRole::Cash, amount))
        .posting(Posting::credit(AccountRole::CustomerDepositsLiability, amount)),
        &chart,
    )
    .unwrap()
}

/// Applies one action, returning the entry to continue with.
fn step(entry: &JournalEntry, action: WorkflowAction) -> Result<JournalEntry, WorkflowError> {
    let actor = UserId::new();
    match action {
        WorkflowAction::Submit => JournalEntryLifecycle::submit(entry, actor),
        WorkflowAction::Approve => JournalEntryLifecycle::approve(entry, actor),
        WorkflowAction::Post => JournalEntryLifecycle::post(entry, actor),
        WorkflowAction::Reject => JournalEntryLifecycle::reject(entry, actor, "reason"),
        WorkflowAction::Reverse => {
            JournalEntryLifecycle::reverse(entry, actor, "reason", entry.entry_date)
                .map(|outcome| outcome.original)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Transitions agree with the transition table.
    ///
    /// *For any* sequence of actions, each action succeeds exactly when the
    /// table allows it, and failure leaves the entry where it was.
    #[test]
    fn prop_actions_follow_table(
        amount in amount(),
        actions in prop::collection::vec(action_strategy(), 1..12),
    ) {
        let mut entry = draft(amount);

        for action in actions {
            let allowed = JournalEntryLifecycle::is_valid_transition(entry.status, action.target_status());
            match step(&entry, action) {
                Ok(next) => {
                    prop_assert!(allowed, "{} from {} should fail", action, entry.status);
                    prop_assert_eq!(next.status, action.target_status());
                    prop_assert_eq!(next.version, entry.version + 1);
                    prop_assert_eq!(next.audit_trail.len(), entry.audit_trail.len() + 1);
                    prop_assert_eq!(&next.lines, &entry.lines);
                    entry = next;
                }
                Err(err) => {
                    prop_assert!(!allowed, "{} from {} should succeed: {}", action, entry.status, err);
                    let is_invalid_transition = matches!(err, WorkflowError::InvalidTransition { .. });
                    prop_assert!(is_invalid_transition);
                }
            }
        }
    }

    /// Property 2: From Draft only Submit and Reject are valid.
    #[test]
    fn prop_draft_exits(action in action_strategy(), amount in amount()) {
        let entry = draft(amount);
        let result = step(&entry, action);

        match action {
            WorkflowAction::Submit | WorkflowAction::Reject => prop_assert!(result.is_ok()),
            _ => {
                let is_invalid_transition = matches!(
                    result,
                    Err(WorkflowError::InvalidTransition { from: JournalEntryStatus::Draft, .. })
                );
                prop_assert!(is_invalid_transition);
            }
        }
    }

    /// Property 3: A reversal exactly offsets the original.
    #[test]
    fn prop_reversal_offsets(amount in amount()) {
        let actor = UserId::new();
        let e = JournalEntryLifecycle::submit(&draft(amount), actor).unwrap();
        let e = JournalEntryLifecycle::approve(&e, actor).unwrap();
        let posted = JournalEntryLifecycle::post(&e, actor).unwrap();

        let outcome = JournalEntryLifecycle::reverse(&posted, actor, "r", posted.entry_date).unwrap();
        let o = posted.totals().unwrap();
        let r = outcome.reversal.totals().unwrap();
        prop_assert_eq!(o.total_debit, r.total_credit);
        prop_assert_eq!(o.total_credit, r.total_debit);
        prop_assert_eq!(outcome.original.lines, posted.lines);
    }
}
