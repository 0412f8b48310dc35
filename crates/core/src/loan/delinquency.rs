//! Delinquency evaluation.
//!
//! Checks are pure functions of a loan snapshot and an evaluation date.
//! Nothing here writes: penalty application is a separate, explicit step
//! keyed by loan and date, so re-running a check on the same day is safe.

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::amortization::AmortizationCalculator;
use super::error::LoanError;
use super::types::{
    DailyDelinquencyReport, DelinquencyStatus, LoanClassification, LoanSnapshot,
    ScheduledInstallment,
};

/// Delinquency classifier configured with the daily penalty rate.
#[derive(Debug, Clone, Copy)]
pub struct DelinquencyClassifier {
    penalty_rate_per_day_percent: Decimal,
}

impl DelinquencyClassifier {
    /// Creates a classifier.
    ///
    /// # Errors
    ///
    /// Returns `NegativeRate` if the penalty rate is negative.
    pub fn new(penalty_rate_per_day_percent: Decimal) -> Result<Self, LoanError> {
        if penalty_rate_per_day_percent < Decimal::ZERO {
            return Err(LoanError::NegativeRate(penalty_rate_per_day_percent));
        }
        Ok(Self {
            penalty_rate_per_day_percent,
        })
    }

    /// The configured daily penalty rate in percent.
    #[must_use]
    pub fn penalty_rate_per_day_percent(&self) -> Decimal {
        self.penalty_rate_per_day_percent
    }

    /// Evaluate one loan as of `today`.
    pub fn check(&self, loan: &LoanSnapshot, today: NaiveDate) -> Result<DelinquencyStatus, LoanError> {
        let days_overdue = loan
            .next_payment_date
            .map_or(0, |due| (today - due).num_days().max(0));

        let (overdue_amount, penalty_amount) = if days_overdue == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let overdue_amount: Decimal = loan
                .installments
                .iter()
                .filter(|i| i.due_date <= today)
                .map(ScheduledInstallment::unpaid)
                .sum();
            let penalty = AmortizationCalculator::calculate_penalty(
                overdue_amount,
                days_overdue,
                self.penalty_rate_per_day_percent,
            )?;
            (overdue_amount, penalty)
        };

        let classification = LoanClassification::from_days_overdue(days_overdue);
        let previous = loan
            .last_classification
            .unwrap_or(LoanClassification::Performing);

        Ok(DelinquencyStatus {
            loan_id: loan.loan_id,
            days_overdue,
            overdue_amount,
            penalty_amount,
            classification,
            classification_changed: classification != previous,
        })
    }

    /// Evaluate every active loan in parallel, returning one status per
    /// active loan in input order.
    pub fn check_all(
        &self,
        loans: &[LoanSnapshot],
        today: NaiveDate,
    ) -> Result<Vec<DelinquencyStatus>, LoanError> {
        loans
            .par_iter()
            .filter(|loan| loan.is_active())
            .map(|loan| self.check(loan, today))
            .collect()
    }

    /// The daily batch: evaluate all active loans and report the delinquent ones.
    pub fn daily_check(
        &self,
        loans: &[LoanSnapshot],
        today: NaiveDate,
    ) -> Result<DailyDelinquencyReport, LoanError> {
        let statuses = self.check_all(loans, today)?;
        Ok(DailyDelinquencyReport::from_statuses(today, statuses))
    }

    /// Delinquent loans at least `min_days_overdue` days late.
    pub fn identify_overdue_loans(
        &self,
        loans: &[LoanSnapshot],
        min_days_overdue: i64,
        today: NaiveDate,
    ) -> Result<Vec<DelinquencyStatus>, LoanError> {
        Ok(self
            .daily_check(loans, today)?
            .overdue_at_least(min_days_overdue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::types::{LoanStatus, LoanTerms};
    use hearth_shared::types::LoanId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn classifier() -> DelinquencyClassifier {
        DelinquencyClassifier::new(dec!(0.1)).unwrap()
    }

    /// Monthly installments of 1000 due on the 1st from February 2026,
    /// with the first `paid` installments settled.
    fn snapshot(paid: u32, count: u32) -> LoanSnapshot {
        let installments: Vec<ScheduledInstallment> = (1..=count)
            .map(|n| ScheduledInstallment {
                installment_number: n,
                due_date: date(2026, 1 + n, 1),
                amount_due: dec!(1000),
                amount_paid: if n <= paid { dec!(1000) } else { Decimal::ZERO },
            })
            .collect();
        let next_payment_date = installments
            .iter()
            .find(|i| !i.unpaid().is_zero())
            .map(|i| i.due_date);

        LoanSnapshot {
            loan_id: LoanId::new(),
            status: LoanStatus::Active,
            terms: LoanTerms::new(dec!(10000), dec!(12), count, date(2026, 1, 1)).unwrap(),
            next_payment_date,
            installments,
            outstanding_principal: dec!(10000),
            accrued_interest: Decimal::ZERO,
            penalty_due: Decimal::ZERO,
            last_classification: None,
        }
    }

    #[test]
    fn test_current_loan_is_performing() {
        let loan = snapshot(0, 10);
        let status = classifier().check(&loan, date(2026, 1, 20)).unwrap();

        assert_eq!(status.days_overdue, 0);
        assert_eq!(status.overdue_amount, Decimal::ZERO);
        assert_eq!(status.penalty_amount, Decimal::ZERO);
        assert_eq!(status.classification, LoanClassification::Performing);
        assert!(!status.classification_changed);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let loan = snapshot(0, 10);
        let status = classifier().check(&loan, date(2026, 2, 1)).unwrap();
        assert_eq!(status.days_overdue, 0);
        assert_eq!(status.overdue_amount, Decimal::ZERO);
    }

    #[test]
    fn test_35_days_overdue_is_special_mention() {
        let loan = snapshot(0, 10);
        // 2026-02-01 + 35 days
        let status = classifier().check(&loan, date(2026, 3, 8)).unwrap();

        assert_eq!(status.days_overdue, 35);
        assert_eq!(status.classification, LoanClassification::SpecialMention);
        // February and March installments are both due
        assert_eq!(status.overdue_amount, dec!(2000));
        // 2000 × 0.1% × 35
        assert_eq!(status.penalty_amount, dec!(70.00));
        assert!(status.classification_changed);
    }

    #[test]
    fn test_95_days_overdue_is_substandard() {
        let loan = snapshot(0, 10);
        let today = date(2026, 2, 1) + chrono::Duration::days(95);
        let status = classifier().check(&loan, today).unwrap();

        assert_eq!(status.days_overdue, 95);
        assert_eq!(status.classification, LoanClassification::Substandard);
    }

    #[test]
    fn test_overdue_but_within_grace_stays_performing() {
        let loan = snapshot(0, 10);
        let status = classifier().check(&loan, date(2026, 2, 11)).unwrap();

        assert_eq!(status.days_overdue, 10);
        assert!(status.is_delinquent());
        assert_eq!(status.classification, LoanClassification::Performing);
        assert!(!status.classification_changed);
    }

    #[test]
    fn test_change_flag_compares_against_recorded_classification() {
        let mut loan = snapshot(0, 10);
        loan.last_classification = Some(LoanClassification::SpecialMention);

        let unchanged = classifier().check(&loan, date(2026, 3, 8)).unwrap();
        assert!(!unchanged.classification_changed);

        let improved = classifier().check(&snapshot(10, 10), date(2026, 3, 8)).unwrap();
        assert!(!improved.classification_changed);

        let mut cured = snapshot(10, 10);
        cured.last_classification = Some(LoanClassification::Doubtful);
        let status = classifier().check(&cured, date(2026, 3, 8)).unwrap();
        assert_eq!(status.classification, LoanClassification::Performing);
        assert!(status.classification_changed);
    }

    #[test]
    fn test_daily_check_skips_inactive_and_reports_delinquent() {
        let current = snapshot(3, 10);
        let late = snapshot(0, 10);
        let mut closed = snapshot(0, 10);
        closed.status = LoanStatus::Closed;

        let loans = vec![current, late.clone(), closed];
        let report = classifier().daily_check(&loans, date(2026, 3, 8)).unwrap();

        assert_eq!(report.loans_checked, 2);
        assert_eq!(report.delinquent_loans.len(), 1);
        assert_eq!(report.delinquent_loans[0].loan_id, late.loan_id);
        assert_eq!(report.total_penalty, dec!(70.00));
    }

    #[test]
    fn test_daily_check_is_idempotent() {
        let loans = vec![snapshot(0, 10), snapshot(1, 10)];
        let today = date(2026, 4, 15);

        let first = classifier().daily_check(&loans, today).unwrap();
        let second = classifier().daily_check(&loans, today).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identify_overdue_loans_filters_by_threshold() {
        let loans = vec![snapshot(0, 10), snapshot(1, 10)];
        // first loan: due 02-01, 42 days late; second: due 03-01, 14 days late
        let today = date(2026, 3, 15);

        let all = classifier().identify_overdue_loans(&loans, 1, today).unwrap();
        assert_eq!(all.len(), 2);

        let severe = classifier().identify_overdue_loans(&loans, 30, today).unwrap();
        assert_eq!(severe.len(), 1);
        assert_eq!(severe[0].days_overdue, 42);
    }

    #[test]
    fn test_negative_penalty_rate_rejected() {
        assert!(matches!(
            DelinquencyClassifier::new(dec!(-0.1)),
            Err(LoanError::NegativeRate(_))
        ));
    }
}
