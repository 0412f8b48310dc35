//! Property-based tests for the payment waterfall.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::PaymentAllocationEngine;

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: Allocation is conservative.
    ///
    /// The buckets always sum to the payment.
    #[test]
    fn prop_allocation_sums_to_payment(
        payment in amount(),
        principal in amount(),
        interest in amount(),
        penalty in amount(),
    ) {
        let a = PaymentAllocationEngine::allocate_payment(payment, principal, interest, penalty).unwrap();
        prop_assert_eq!(a.allocated_total(), payment);
        prop_assert_eq!(a.total_payment, payment);
    }

    /// Property 2: No bucket receives more than is owed.
    #[test]
    fn prop_buckets_capped(
        payment in amount(),
        principal in amount(),
        interest in amount(),
        penalty in amount(),
    ) {
        let a = PaymentAllocationEngine::allocate_payment(payment, principal, interest, penalty).unwrap();
        prop_assert!(a.penalty_paid <= penalty);
        prop_assert!(a.interest_paid <= interest);
        prop_assert!(a.principal_paid <= principal);
        prop_assert!(a.overpayment >= Decimal::ZERO);
    }

    /// Property 3: Waterfall order.
    ///
    /// A later bucket is touched only once every earlier bucket is settled.
    #[test]
    fn prop_waterfall_order(
        payment in amount(),
        principal in amount(),
        interest in amount(),
        penalty in amount(),
    ) {
        let a = PaymentAllocationEngine::allocate_payment(payment, principal, interest, penalty).unwrap();

        if a.penalty_paid < penalty {
            prop_assert_eq!(a.interest_paid, Decimal::ZERO);
        }
        if a.interest_paid < interest {
            prop_assert_eq!(a.principal_paid, Decimal::ZERO);
        }
        if a.overpayment > Decimal::ZERO {
            prop_assert_eq!(a.penalty_paid, penalty);
            prop_assert_eq!(a.interest_paid, interest);
            prop_assert_eq!(a.principal_paid, principal);
        }
    }
}
