//! Delinquency checks over stored loans.

use std::sync::Arc;

use chrono::NaiveDate;
use hearth_shared::types::LoanId;
use tracing::{info, warn};

use super::error::IntegrationError;
use crate::loan::{DailyDelinquencyReport, DelinquencyClassifier, DelinquencyStatus};
use crate::ports::LedgerGateway;

/// Runs the delinquency classifier against loans held by the gateway.
///
/// The only writes are classification updates for loans whose bucket moved.
/// Penalties are assessed here but applied separately through
/// `LoanAdapter::apply_penalty`.
pub struct DelinquencyService<G> {
    gateway: Arc<G>,
    classifier: DelinquencyClassifier,
}

impl<G: LedgerGateway> DelinquencyService<G> {
    /// Create a service.
    #[must_use]
    pub fn new(gateway: Arc<G>, classifier: DelinquencyClassifier) -> Self {
        Self {
            gateway,
            classifier,
        }
    }

    /// Check one loan on demand.
    pub async fn check_loan(
        &self,
        loan_id: LoanId,
        today: NaiveDate,
    ) -> Result<DelinquencyStatus, IntegrationError> {
        let loan = self
            .gateway
            .load_loan_snapshot(loan_id)
            .await?
            .ok_or(IntegrationError::LoanNotFound(loan_id))?;

        let status = self.classifier.check(&loan, today)?;
        self.persist_change(&status).await?;
        Ok(status)
    }

    /// The daily batch over every active loan.
    ///
    /// Running it again on the same day finds no classification changes and
    /// returns the same report.
    pub async fn daily_check(
        &self,
        today: NaiveDate,
    ) -> Result<DailyDelinquencyReport, IntegrationError> {
        let loans = self.gateway.list_active_loans().await?;
        let statuses = self.classifier.check_all(&loans, today)?;

        for status in statuses.iter().filter(|s| s.classification_changed) {
            self.persist_change(status).await?;
        }

        let report = DailyDelinquencyReport::from_statuses(today, statuses);
        info!(
            checked_on = %today,
            loans_checked = report.loans_checked,
            delinquent = report.delinquent_loans.len(),
            total_penalty = %report.total_penalty,
            "Daily delinquency check complete"
        );
        Ok(report)
    }

    /// Delinquent loans at least `min_days_overdue` days late.
    pub async fn identify_overdue_loans(
        &self,
        min_days_overdue: i64,
        today: NaiveDate,
    ) -> Result<Vec<DelinquencyStatus>, IntegrationError> {
        Ok(self
            .daily_check(today)
            .await?
            .overdue_at_least(min_days_overdue))
    }

    async fn persist_change(&self, status: &DelinquencyStatus) -> Result<(), IntegrationError> {
        if !status.classification_changed {
            return Ok(());
        }
        self.gateway
            .save_loan_classification(status.loan_id, status.classification)
            .await?;
        warn!(
            loan_id = %status.loan_id,
            days_overdue = status.days_overdue,
            classification = %status.classification,
            "Loan classification changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::test_support::MockGateway;
    use crate::loan::{LoanClassification, LoanSnapshot, LoanStatus, LoanTerms, ScheduledInstallment};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(next_due: Option<NaiveDate>) -> LoanSnapshot {
        let installments = next_due
            .map(|due| {
                vec![ScheduledInstallment {
                    installment_number: 1,
                    due_date: due,
                    amount_due: dec!(9025.83),
                    amount_paid: Decimal::ZERO,
                }]
            })
            .unwrap_or_default();
        LoanSnapshot {
            loan_id: LoanId::new(),
            status: LoanStatus::Active,
            terms: LoanTerms::new(dec!(100000), dec!(15), 12, date(2026, 1, 1)).unwrap(),
            next_payment_date: next_due,
            installments,
            outstanding_principal: dec!(100000),
            accrued_interest: Decimal::ZERO,
            penalty_due: Decimal::ZERO,
            last_classification: None,
        }
    }

    fn service(gateway: &Arc<MockGateway>) -> DelinquencyService<MockGateway> {
        DelinquencyService::new(
            Arc::clone(gateway),
            DelinquencyClassifier::new(dec!(0.1)).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_check_loan_persists_new_classification() {
        let gateway = Arc::new(MockGateway::default());
        let snapshot = loan(Some(date(2026, 2, 1)));
        let loan_id = snapshot.loan_id;
        gateway.add_loan(snapshot);

        let status = service(&gateway)
            .check_loan(loan_id, date(2026, 3, 8))
            .await
            .unwrap();

        assert_eq!(status.days_overdue, 35);
        assert_eq!(status.classification, LoanClassification::SpecialMention);
        assert!(status.classification_changed);
        assert_eq!(
            gateway.loans.lock().unwrap()[&loan_id].last_classification,
            Some(LoanClassification::SpecialMention)
        );
    }

    #[tokio::test]
    async fn test_daily_check_is_idempotent() {
        let gateway = Arc::new(MockGateway::default());
        gateway.add_loan(loan(Some(date(2026, 2, 1))));
        gateway.add_loan(loan(Some(date(2026, 5, 1))));
        gateway.add_loan(loan(None));
        let svc = service(&gateway);
        let today = date(2026, 5, 7);

        let first = svc.daily_check(today).await.unwrap();
        assert_eq!(first.loans_checked, 3);
        assert_eq!(first.delinquent_loans.len(), 2);
        assert!(first.delinquent_loans.iter().any(|s| s.classification_changed));

        let second = svc.daily_check(today).await.unwrap();
        assert_eq!(second.loans_checked, 3);
        assert_eq!(second.total_penalty, first.total_penalty);
        assert!(second.delinquent_loans.iter().all(|s| !s.classification_changed));
    }

    #[tokio::test]
    async fn test_identify_overdue_loans() {
        let gateway = Arc::new(MockGateway::default());
        gateway.add_loan(loan(Some(date(2026, 1, 1))));
        gateway.add_loan(loan(Some(date(2026, 4, 20))));

        let found = service(&gateway)
            .identify_overdue_loans(90, date(2026, 5, 1))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_overdue, 120);
        assert_eq!(found[0].classification, LoanClassification::Substandard);
    }

    #[tokio::test]
    async fn test_unknown_loan() {
        let gateway = Arc::new(MockGateway::default());
        let err = service(&gateway)
            .check_loan(LoanId::new(), date(2026, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, IntegrationError::LoanNotFound(_)));
    }
}
