//! Loan event postings.

use chrono::Days;
use hearth_shared::types::{JournalEntryId, LoanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{IntegrationError, require_minor_units, require_positive};
use super::pipeline::{PostingContext, PostingPipeline};
use crate::accounts::{AccountRole, ChartOfAccountResolver};
use crate::ledger::Posting;
use crate::loan::{DelinquencyStatus, PaymentAllocation, PaymentAllocationEngine};
use crate::ports::LedgerGateway;

/// A posted repayment and how it was split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentRecorded {
    /// The posted entry.
    pub entry_id: JournalEntryId,
    /// Waterfall split of the payment.
    pub allocation: PaymentAllocation,
}

/// Posts loan disbursements, repayments, write-offs, and penalties.
pub struct LoanAdapter<G, R> {
    pipeline: PostingPipeline<G, R>,
}

impl<G: LedgerGateway, R: ChartOfAccountResolver> LoanAdapter<G, R> {
    /// Create an adapter over a posting pipeline.
    #[must_use]
    pub fn new(pipeline: PostingPipeline<G, R>) -> Self {
        Self { pipeline }
    }

    /// Loan principal paid out to the borrower.
    ///
    /// Debit loans receivable, credit cash.
    pub async fn record_disbursement(
        &self,
        ctx: &PostingContext,
        loan_id: LoanId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;

        let entry = ctx.entry(
            format!("Disbursement of loan {loan_id}"),
            [
                Posting::debit(AccountRole::LoansReceivable, amount),
                Posting::credit(AccountRole::Cash, amount),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, loan_id = %loan_id, %amount, "Loan disbursement recorded");
        Ok(id)
    }

    /// A borrower payment, split by the allocation waterfall.
    ///
    /// Debit cash for the whole payment; credit penalty receivable, interest
    /// income, loans receivable, and overpayment liability for each non-zero
    /// component in that order.
    pub async fn record_repayment(
        &self,
        ctx: &PostingContext,
        loan_id: LoanId,
        payment: Decimal,
    ) -> Result<RepaymentRecorded, IntegrationError> {
        require_positive("payment", payment)?;

        let loan = self
            .pipeline
            .gateway()
            .load_loan_snapshot(loan_id)
            .await?
            .ok_or(IntegrationError::LoanNotFound(loan_id))?;
        require_minor_units("outstanding_principal", loan.outstanding_principal)?;
        require_minor_units("accrued_interest", loan.accrued_interest)?;
        require_minor_units("penalty_due", loan.penalty_due)?;

        let allocation = PaymentAllocationEngine::allocate_payment(
            payment,
            loan.outstanding_principal,
            loan.accrued_interest,
            loan.penalty_due,
        )?;

        let credits = [
            (AccountRole::PenaltyReceivable, allocation.penalty_paid),
            (AccountRole::InterestIncome, allocation.interest_paid),
            (AccountRole::LoansReceivable, allocation.principal_paid),
            (AccountRole::LoanOverpaymentLiability, allocation.overpayment),
        ];
        let postings = std::iter::once(Posting::debit(AccountRole::Cash, payment)).chain(
            credits
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(role, amount)| Posting::credit(role, amount)),
        );

        let entry = ctx.entry(format!("Repayment of loan {loan_id}"), postings);
        let entry_id = self.pipeline.record(entry, ctx.actor).await?;

        if !allocation.overpayment.is_zero() {
            warn!(
                loan_id = %loan_id,
                overpayment = %allocation.overpayment,
                "Repayment exceeds amount owed"
            );
        }
        info!(
            entry_id = %entry_id,
            loan_id = %loan_id,
            penalty = %allocation.penalty_paid,
            interest = %allocation.interest_paid,
            principal = %allocation.principal_paid,
            "Loan repayment recorded"
        );
        Ok(RepaymentRecorded {
            entry_id,
            allocation,
        })
    }

    /// Write a loan balance off against the loss allowance.
    ///
    /// Debit allowance for loan losses, credit loans receivable.
    pub async fn record_write_off(
        &self,
        ctx: &PostingContext,
        loan_id: LoanId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;

        let entry = ctx.entry(
            format!("Write-off of loan {loan_id}"),
            [
                Posting::debit(AccountRole::AllowanceForLoanLosses, amount),
                Posting::credit(AccountRole::LoansReceivable, amount),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        warn!(entry_id = %id, loan_id = %loan_id, %amount, "Loan written off");
        Ok(id)
    }

    /// Accrue the penalty assessed by a delinquency check.
    ///
    /// `status.penalty_amount` is the penalty accrued over the whole overdue
    /// run, which started `days_overdue` days before the entry date. Only
    /// the part not yet claimed for that run is posted, so a daily batch
    /// books one day of penalty per run. At most one claim is recorded per
    /// loan per entry date: the claim is recorded with the gateway before
    /// posting and released if posting fails. Returns `None` when there is
    /// nothing new to apply or the penalty was already applied for that date.
    ///
    /// Debit penalty receivable, credit penalty income.
    pub async fn apply_penalty(
        &self,
        ctx: &PostingContext,
        status: &DelinquencyStatus,
    ) -> Result<Option<JournalEntryId>, IntegrationError> {
        if status.penalty_amount <= Decimal::ZERO {
            return Ok(None);
        }
        require_minor_units("penalty_amount", status.penalty_amount)?;

        let overdue_since = u64::try_from(status.days_overdue)
            .ok()
            .and_then(|days| ctx.entry_date.checked_sub_days(Days::new(days)))
            .ok_or_else(|| {
                IntegrationError::invalid(
                    "days_overdue",
                    format!("out of range: {}", status.days_overdue),
                )
            })?;

        let gateway = self.pipeline.gateway();
        let already_applied = gateway
            .penalty_applied_since(status.loan_id, overdue_since)
            .await?;
        let amount = status.penalty_amount - already_applied;
        if amount <= Decimal::ZERO {
            debug!(
                loan_id = %status.loan_id,
                accrued = %status.penalty_amount,
                applied = %already_applied,
                "Penalty fully applied, skipping"
            );
            return Ok(None);
        }

        let claimed = gateway
            .record_penalty_application(status.loan_id, ctx.entry_date, amount)
            .await?;
        if !claimed {
            info!(
                loan_id = %status.loan_id,
                date = %ctx.entry_date,
                "Penalty already applied for date, skipping"
            );
            return Ok(None);
        }

        let entry = ctx.entry(
            format!(
                "Late payment penalty on loan {} ({} days overdue)",
                status.loan_id, status.days_overdue
            ),
            [
                Posting::debit(AccountRole::PenaltyReceivable, amount),
                Posting::credit(AccountRole::PenaltyIncome, amount),
            ],
        );

        match self.pipeline.record(entry, ctx.actor).await {
            Ok(id) => {
                info!(
                    entry_id = %id,
                    loan_id = %status.loan_id,
                    %amount,
                    accrued = %status.penalty_amount,
                    "Penalty applied"
                );
                Ok(Some(id))
            }
            Err(err) => {
                warn!(loan_id = %status.loan_id, error = %err, "Penalty posting failed, releasing claim");
                gateway
                    .release_penalty_application(status.loan_id, ctx.entry_date)
                    .await?;
                Err(err)
            }
        }
    }
}
