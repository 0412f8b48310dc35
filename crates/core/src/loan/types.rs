//! Loan domain types.
//!
//! Loans are plain value structs. Related entities (applications,
//! guarantors, customers) are referenced by ID and looked up through the
//! persistence gateway, never embedded.

use chrono::{Months, NaiveDate};
use hearth_shared::types::LoanId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LoanError;

/// Immutable inputs to loan money math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount disbursed.
    pub principal: Decimal,
    /// Nominal annual interest rate in percent (15 means 15%).
    pub annual_rate_percent: Decimal,
    /// Number of monthly installments.
    pub tenor_months: u32,
    /// Disbursement date; installment `k` is due `k` months later.
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// Creates validated loan terms.
    ///
    /// # Errors
    ///
    /// Returns an error if `principal <= 0`, `annual_rate_percent < 0`, or
    /// `tenor_months == 0`.
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        tenor_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self, LoanError> {
        validate_terms(principal, annual_rate_percent, tenor_months)?;
        Ok(Self {
            principal,
            annual_rate_percent,
            tenor_months,
            start_date,
        })
    }

    /// Periodic (monthly) rate as a fraction: `annual_rate_percent / 12 / 100`.
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        monthly_rate(self.annual_rate_percent)
    }

    /// Due date of the given 1-based installment.
    ///
    /// # Errors
    ///
    /// Returns `DueDateOutOfRange` if the date overflows the calendar.
    pub fn due_date(&self, installment_number: u32) -> Result<NaiveDate, LoanError> {
        self.start_date
            .checked_add_months(Months::new(installment_number))
            .ok_or(LoanError::DueDateOutOfRange(installment_number))
    }
}

pub(crate) fn validate_terms(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenor_months: u32,
) -> Result<(), LoanError> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::NonPositivePrincipal(principal));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::NegativeRate(annual_rate_percent));
    }
    if tenor_months == 0 {
        return Err(LoanError::ZeroTenor);
    }
    Ok(())
}

pub(crate) fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::from(12) / Decimal::ONE_HUNDRED
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationInstallment {
    /// 1-based, contiguous installment number.
    pub installment_number: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Principal component.
    pub principal_payment: Decimal,
    /// Interest component.
    pub interest_payment: Decimal,
    /// `principal_payment + interest_payment`.
    pub total_payment: Decimal,
    /// Principal outstanding after this installment.
    pub remaining_balance: Decimal,
}

/// Closed-form payoff quote for an early repayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyRepaymentQuote {
    /// Principal still owed.
    pub outstanding_principal: Decimal,
    /// Simple daily interest accrued on the outstanding principal.
    pub accrued_interest: Decimal,
    /// `outstanding_principal + accrued_interest`.
    pub total_early_repayment_amount: Decimal,
    /// Whole days between disbursement and repayment.
    pub days_elapsed: i64,
}

/// Outcome of applying one payment to one loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    /// Payment received.
    pub total_payment: Decimal,
    /// Portion applied to penalty.
    pub penalty_paid: Decimal,
    /// Portion applied to accrued interest.
    pub interest_paid: Decimal,
    /// Portion applied to principal.
    pub principal_paid: Decimal,
    /// Remainder after every bucket is covered.
    pub overpayment: Decimal,
}

impl PaymentAllocation {
    /// Sum of all buckets; always equals `total_payment`.
    #[must_use]
    pub fn allocated_total(&self) -> Decimal {
        self.penalty_paid + self.interest_paid + self.principal_paid + self.overpayment
    }
}

/// Regulatory risk classification by days overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanClassification {
    /// 0–30 days overdue.
    Performing,
    /// 31–90 days overdue.
    SpecialMention,
    /// 91–180 days overdue.
    Substandard,
    /// 181–270 days overdue.
    Doubtful,
    /// 271 or more days overdue.
    Loss,
}

impl LoanClassification {
    /// Classifies a loan by days overdue. Thresholds are evaluated in
    /// ascending order and the first match wins.
    #[must_use]
    pub fn from_days_overdue(days_overdue: i64) -> Self {
        match days_overdue {
            i64::MIN..=30 => Self::Performing,
            31..=90 => Self::SpecialMention,
            91..=180 => Self::Substandard,
            181..=270 => Self::Doubtful,
            _ => Self::Loss,
        }
    }

    /// Returns the string representation of the classification.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performing => "performing",
            Self::SpecialMention => "special_mention",
            Self::Substandard => "substandard",
            Self::Doubtful => "doubtful",
            Self::Loss => "loss",
        }
    }
}

impl std::fmt::Display for LoanClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loan lifecycle status as recorded by the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Disbursed and being repaid.
    Active,
    /// Fully repaid.
    Closed,
    /// Written off against the loan-loss allowance.
    WrittenOff,
}

/// Repayment state of one scheduled installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// 1-based installment number.
    pub installment_number: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount due (principal + interest).
    pub amount_due: Decimal,
    /// Amount received so far against this installment.
    pub amount_paid: Decimal,
}

impl ScheduledInstallment {
    /// Amount still unpaid, never negative.
    #[must_use]
    pub fn unpaid(&self) -> Decimal {
        (self.amount_due - self.amount_paid).max(Decimal::ZERO)
    }
}

/// Point-in-time view of a loan, loaded from the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Current status.
    pub status: LoanStatus,
    /// Terms fixed at disbursement.
    pub terms: LoanTerms,
    /// Earliest unpaid due date, `None` when nothing is outstanding.
    pub next_payment_date: Option<NaiveDate>,
    /// Installment repayment state.
    pub installments: Vec<ScheduledInstallment>,
    /// Principal still owed.
    pub outstanding_principal: Decimal,
    /// Interest accrued and unpaid.
    pub accrued_interest: Decimal,
    /// Penalty accrued and unpaid.
    pub penalty_due: Decimal,
    /// Classification recorded by the last delinquency check.
    pub last_classification: Option<LoanClassification>,
}

impl LoanSnapshot {
    /// Returns true if the loan is subject to delinquency checks.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

/// Result of one delinquency evaluation. Derived, never a source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelinquencyStatus {
    /// Loan evaluated.
    pub loan_id: LoanId,
    /// Whole days past the next payment date, zero if not late.
    pub days_overdue: i64,
    /// Sum of unpaid installments due on or before the evaluation date.
    pub overdue_amount: Decimal,
    /// Simple daily penalty on the overdue amount.
    pub penalty_amount: Decimal,
    /// Classification for `days_overdue`.
    pub classification: LoanClassification,
    /// True if the classification differs from the last recorded one.
    pub classification_changed: bool,
}

impl DelinquencyStatus {
    /// Returns true if any amount is past due.
    #[must_use]
    pub fn is_delinquent(&self) -> bool {
        self.days_overdue > 0
    }
}

/// Output of the daily delinquency batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDelinquencyReport {
    /// Evaluation date.
    pub checked_on: NaiveDate,
    /// Number of active loans evaluated.
    pub loans_checked: usize,
    /// Loans with `days_overdue > 0`, in input order.
    pub delinquent_loans: Vec<DelinquencyStatus>,
    /// Sum of penalties assessed across delinquent loans. Assessed only;
    /// applying a penalty is a separate write keyed by loan and date.
    pub total_penalty: Decimal,
}

impl DailyDelinquencyReport {
    /// Builds a report from the per-loan statuses of one batch run.
    #[must_use]
    pub fn from_statuses(checked_on: NaiveDate, statuses: Vec<DelinquencyStatus>) -> Self {
        let loans_checked = statuses.len();
        let delinquent_loans: Vec<DelinquencyStatus> =
            statuses.into_iter().filter(DelinquencyStatus::is_delinquent).collect();
        let total_penalty = delinquent_loans.iter().map(|s| s.penalty_amount).sum();

        Self {
            checked_on,
            loans_checked,
            delinquent_loans,
            total_penalty,
        }
    }

    /// Loans at least `min_days_overdue` days late.
    #[must_use]
    pub fn overdue_at_least(&self, min_days_overdue: i64) -> Vec<DelinquencyStatus> {
        self.delinquent_loans
            .iter()
            .filter(|s| s.days_overdue >= min_days_overdue)
            .cloned()
            .collect()
    }
}
