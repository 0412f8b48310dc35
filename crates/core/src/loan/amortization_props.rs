//! Property-based tests for amortization schedules and penalties.

use chrono::NaiveDate;
use hearth_shared::types::within_minor_unit;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amortization::AmortizationCalculator;
use super::types::LoanTerms;

/// Principal from 1,000.00 to 10,000,000.00.
fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (100_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Annual rate from 0.00% to 36.00%.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=3600i64).prop_map(|bp| Decimal::new(bp, 2))
}

fn tenor_strategy() -> impl Strategy<Value = u32> {
    1u32..=360u32
}

fn terms_strategy() -> impl Strategy<Value = LoanTerms> {
    (principal_strategy(), rate_strategy(), tenor_strategy()).prop_map(|(p, r, n)| {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        LoanTerms::new(p, r, n, start).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property 1: One installment per month, numbered contiguously from 1.
    #[test]
    fn prop_schedule_length_and_numbering(terms in terms_strategy()) {
        let schedule = AmortizationCalculator::generate_schedule(&terms).unwrap();

        prop_assert_eq!(schedule.len(), terms.tenor_months as usize);
        for (idx, row) in schedule.iter().enumerate() {
            prop_assert_eq!(row.installment_number as usize, idx + 1);
        }
    }

    /// Property 2: The loan is fully repaid, exactly.
    ///
    /// The final balance is zero and the principal components sum to the
    /// disbursed principal with no rounding residue.
    #[test]
    fn prop_schedule_repays_principal_exactly(terms in terms_strategy()) {
        let schedule = AmortizationCalculator::generate_schedule(&terms).unwrap();

        let last = schedule.last().unwrap();
        prop_assert_eq!(last.remaining_balance, Decimal::ZERO);

        let principal_sum: Decimal = schedule.iter().map(|i| i.principal_payment).sum();
        prop_assert_eq!(principal_sum, terms.principal);
    }

    /// Property 3: Every row is internally consistent and never negative.
    #[test]
    fn prop_rows_consistent(terms in terms_strategy()) {
        let schedule = AmortizationCalculator::generate_schedule(&terms).unwrap();

        let mut previous_balance = terms.principal;
        for row in &schedule {
            prop_assert!(row.principal_payment >= Decimal::ZERO);
            prop_assert!(row.interest_payment >= Decimal::ZERO);
            prop_assert_eq!(row.total_payment, row.principal_payment + row.interest_payment);
            prop_assert_eq!(row.remaining_balance, previous_balance - row.principal_payment);
            prop_assert!(row.remaining_balance >= Decimal::ZERO);
            previous_balance = row.remaining_balance;
        }
    }

    /// Property 4: Each row charges one month of interest on the opening
    /// balance, off by no more than the rounding to a minor unit.
    #[test]
    fn prop_interest_tracks_opening_balance(terms in terms_strategy()) {
        let schedule = AmortizationCalculator::generate_schedule(&terms).unwrap();
        let monthly_rate = terms.annual_rate_percent / Decimal::from(1200);

        let mut opening = terms.principal;
        for row in &schedule {
            let exact = opening * monthly_rate;
            prop_assert!(
                within_minor_unit(row.interest_payment, exact),
                "installment {} charged {} on {}", row.installment_number, row.interest_payment, exact
            );
            opening = row.remaining_balance;
        }
    }

    /// Property 5: Interest falls and principal grows as the balance shrinks.
    ///
    /// The final installment absorbs rounding residue, so its principal is
    /// excluded from the principal ordering.
    #[test]
    fn prop_reducing_balance_shape(terms in terms_strategy()) {
        let schedule = AmortizationCalculator::generate_schedule(&terms).unwrap();

        for pair in schedule.windows(2) {
            prop_assert!(
                pair[1].interest_payment <= pair[0].interest_payment,
                "interest rose at installment {}", pair[1].installment_number
            );
        }

        let body = &schedule[..schedule.len() - 1];
        for pair in body.windows(2) {
            prop_assert!(
                pair[1].principal_payment >= pair[0].principal_payment,
                "principal fell at installment {}", pair[1].installment_number
            );
        }
    }

    /// Property 6: Penalty is never negative and never falls as days grow.
    #[test]
    fn prop_penalty_monotone_in_days(
        overdue_cents in 0i64..100_000_000i64,
        rate_bp in 0i64..=100i64,
        days in 0i64..1000i64,
        extra in 0i64..1000i64,
    ) {
        let overdue = Decimal::new(overdue_cents, 2);
        let rate = Decimal::new(rate_bp, 2);

        let earlier = AmortizationCalculator::calculate_penalty(overdue, days, rate).unwrap();
        let later = AmortizationCalculator::calculate_penalty(overdue, days + extra, rate).unwrap();

        prop_assert!(earlier >= Decimal::ZERO);
        prop_assert!(later >= earlier);
    }
}
