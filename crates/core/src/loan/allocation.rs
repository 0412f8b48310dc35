//! Payment waterfall allocation.

use rust_decimal::Decimal;

use super::error::LoanError;
use super::types::PaymentAllocation;

/// Stateless waterfall allocator.
///
/// A payment is applied in a fixed order: penalty, then interest, then
/// principal. Whatever is left after principal is fully covered is
/// reported as overpayment.
pub struct PaymentAllocationEngine;

impl PaymentAllocationEngine {
    /// Split `payment` across the penalty, interest and principal buckets.
    ///
    /// Negative bucket inputs are treated as nothing owed.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `payment < 0`.
    pub fn allocate_payment(
        payment: Decimal,
        outstanding_principal: Decimal,
        accrued_interest: Decimal,
        penalty_due: Decimal,
    ) -> Result<PaymentAllocation, LoanError> {
        if payment < Decimal::ZERO {
            return Err(LoanError::NegativeAmount {
                field: "payment",
                value: payment,
            });
        }

        let mut remaining = payment;
        let penalty_paid = take(&mut remaining, penalty_due);
        let interest_paid = take(&mut remaining, accrued_interest);
        let principal_paid = take(&mut remaining, outstanding_principal);

        Ok(PaymentAllocation {
            total_payment: payment,
            penalty_paid,
            interest_paid,
            principal_paid,
            overpayment: remaining,
        })
    }
}

/// Moves `min(remaining, due)` out of `remaining`.
fn take(remaining: &mut Decimal, due: Decimal) -> Decimal {
    let paid = (*remaining).min(due.max(Decimal::ZERO));
    *remaining -= paid;
    paid
}
