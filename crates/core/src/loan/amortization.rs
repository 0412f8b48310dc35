//! Reducing-balance amortization math.
//!
//! All functions are pure and stateless; every money result is rounded to
//! the minor unit with Banker's Rounding.

use chrono::NaiveDate;
use hearth_shared::types::round_money;
use rayon::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

use super::error::LoanError;
use super::types::{
    AmortizationInstallment, EarlyRepaymentQuote, LoanTerms, monthly_rate, validate_terms,
};

/// Day-count basis for converting an annual rate to a daily rate.
pub const DAYS_IN_YEAR: u32 = 365;

/// Stateless calculator for EMI, schedules, penalties, and payoff quotes.
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    /// Calculate the equated monthly installment.
    ///
    /// `emi = P·r·(1+r)^n / ((1+r)^n − 1)` with `r = annual_rate_percent / 12 / 100`.
    /// A zero rate degenerates to `P / n`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use hearth_core::loan::AmortizationCalculator;
    ///
    /// let emi = AmortizationCalculator::calculate_emi(dec!(100000), dec!(15), 12).unwrap();
    /// assert_eq!(emi, dec!(9025.83));
    /// ```
    pub fn calculate_emi(
        principal: Decimal,
        annual_rate_percent: Decimal,
        tenor_months: u32,
    ) -> Result<Decimal, LoanError> {
        validate_terms(principal, annual_rate_percent, tenor_months)?;

        let n = Decimal::from(tenor_months);
        let r = monthly_rate(annual_rate_percent);
        if r.is_zero() {
            return Ok(round_money(principal / n));
        }

        let growth = (Decimal::ONE + r)
            .checked_powu(u64::from(tenor_months))
            .ok_or(LoanError::CalculationOverflow)?;
        let numerator = principal
            .checked_mul(r)
            .and_then(|v| v.checked_mul(growth))
            .ok_or(LoanError::CalculationOverflow)?;
        let emi = numerator
            .checked_div(growth - Decimal::ONE)
            .ok_or(LoanError::CalculationOverflow)?;

        Ok(round_money(emi))
    }

    /// Generate the full reducing-balance schedule.
    ///
    /// The final installment takes whatever principal is left, so the last
    /// `remaining_balance` is exactly zero and the principal components sum
    /// exactly to the loan principal.
    pub fn generate_schedule(terms: &LoanTerms) -> Result<Vec<AmortizationInstallment>, LoanError> {
        let emi =
            Self::calculate_emi(terms.principal, terms.annual_rate_percent, terms.tenor_months)?;
        let r = terms.monthly_rate();

        let mut balance = terms.principal;
        let mut schedule = Vec::with_capacity(terms.tenor_months as usize);

        for installment_number in 1..=terms.tenor_months {
            let due_date = terms.due_date(installment_number)?;
            let interest_payment = round_money(balance * r);

            let principal_payment = if installment_number == terms.tenor_months {
                balance
            } else {
                (emi - interest_payment).max(Decimal::ZERO).min(balance)
            };
            balance -= principal_payment;

            schedule.push(AmortizationInstallment {
                installment_number,
                due_date,
                principal_payment,
                interest_payment,
                total_payment: principal_payment + interest_payment,
                remaining_balance: balance,
            });
        }

        Ok(schedule)
    }

    /// Generate schedules for many loans in parallel.
    ///
    /// Results are returned in input order; the first failing loan's error
    /// is returned.
    pub fn generate_schedules(
        loans: &[LoanTerms],
    ) -> Result<Vec<Vec<AmortizationInstallment>>, LoanError> {
        loans.par_iter().map(Self::generate_schedule).collect()
    }

    /// Total interest over the life of the loan.
    pub fn calculate_total_interest(terms: &LoanTerms) -> Result<Decimal, LoanError> {
        let schedule = Self::generate_schedule(terms)?;
        Ok(schedule.iter().map(|i| i.interest_payment).sum())
    }

    /// Principal plus total interest.
    pub fn calculate_total_repayable(terms: &LoanTerms) -> Result<Decimal, LoanError> {
        Ok(terms.principal + Self::calculate_total_interest(terms)?)
    }

    /// Simple (non-compounding) daily penalty on an overdue amount.
    ///
    /// `penalty = overdue_amount × (rate_per_day_percent / 100) × days_overdue`,
    /// zero when `days_overdue <= 0`.
    pub fn calculate_penalty(
        overdue_amount: Decimal,
        days_overdue: i64,
        penalty_rate_per_day_percent: Decimal,
    ) -> Result<Decimal, LoanError> {
        if overdue_amount < Decimal::ZERO {
            return Err(LoanError::NegativeAmount {
                field: "overdue_amount",
                value: overdue_amount,
            });
        }
        if penalty_rate_per_day_percent < Decimal::ZERO {
            return Err(LoanError::NegativeRate(penalty_rate_per_day_percent));
        }
        if days_overdue <= 0 || overdue_amount.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let penalty = overdue_amount
            .checked_mul(penalty_rate_per_day_percent / Decimal::ONE_HUNDRED)
            .and_then(|v| v.checked_mul(Decimal::from(days_overdue)))
            .ok_or(LoanError::CalculationOverflow)?;

        Ok(round_money(penalty))
    }

    /// Closed-form payoff quote: outstanding principal plus simple daily
    /// interest since disbursement. No schedule is recomputed.
    pub fn calculate_early_repayment(
        original_principal: Decimal,
        principal_already_paid: Decimal,
        annual_rate_percent: Decimal,
        disbursement_date: NaiveDate,
        repayment_date: NaiveDate,
    ) -> Result<EarlyRepaymentQuote, LoanError> {
        if original_principal <= Decimal::ZERO {
            return Err(LoanError::NonPositivePrincipal(original_principal));
        }
        if principal_already_paid < Decimal::ZERO {
            return Err(LoanError::NegativeAmount {
                field: "principal_already_paid",
                value: principal_already_paid,
            });
        }
        if principal_already_paid > original_principal {
            return Err(LoanError::PaidExceedsPrincipal {
                paid: principal_already_paid,
                principal: original_principal,
            });
        }
        if annual_rate_percent < Decimal::ZERO {
            return Err(LoanError::NegativeRate(annual_rate_percent));
        }
        if repayment_date < disbursement_date {
            return Err(LoanError::RepaymentBeforeDisbursement {
                disbursement: disbursement_date,
                repayment: repayment_date,
            });
        }

        let outstanding_principal = original_principal - principal_already_paid;
        let days_elapsed = (repayment_date - disbursement_date).num_days();
        let daily_rate =
            annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(DAYS_IN_YEAR);
        let accrued_interest = round_money(
            outstanding_principal
                .checked_mul(daily_rate)
                .and_then(|v| v.checked_mul(Decimal::from(days_elapsed)))
                .ok_or(LoanError::CalculationOverflow)?,
        );

        Ok(EarlyRepaymentQuote {
            outstanding_principal,
            accrued_interest,
            total_early_repayment_amount: outstanding_principal + accrued_interest,
            days_elapsed,
        })
    }
}
