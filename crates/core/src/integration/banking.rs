//! Deposit account postings.

use hearth_shared::types::{CustomerAccountId, JournalEntryId};
use rust_decimal::Decimal;
use tracing::info;

use super::error::{IntegrationError, require_positive};
use super::pipeline::{PostingContext, PostingPipeline};
use crate::accounts::{AccountRole, ChartOfAccountResolver};
use crate::ledger::Posting;
use crate::ports::LedgerGateway;

/// Posts cash movements on member deposit accounts.
pub struct BankingAdapter<G, R> {
    pipeline: PostingPipeline<G, R>,
}

impl<G: LedgerGateway, R: ChartOfAccountResolver> BankingAdapter<G, R> {
    /// Create an adapter over a posting pipeline.
    #[must_use]
    pub fn new(pipeline: PostingPipeline<G, R>) -> Self {
        Self { pipeline }
    }

    /// Cash received into a member account.
    ///
    /// Debit cash, credit customer deposits.
    pub async fn record_deposit(
        &self,
        ctx: &PostingContext,
        account: CustomerAccountId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;

        let entry = ctx.entry(
            format!("Deposit to account {account}"),
            [
                Posting::debit(AccountRole::Cash, amount),
                Posting::credit(AccountRole::CustomerDepositsLiability, amount),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, account = %account, %amount, "Deposit recorded");
        Ok(id)
    }

    /// Cash paid out of a member account.
    ///
    /// Debit customer deposits, credit cash.
    pub async fn record_withdrawal(
        &self,
        ctx: &PostingContext,
        account: CustomerAccountId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;

        let entry = ctx.entry(
            format!("Withdrawal from account {account}"),
            [
                Posting::debit(AccountRole::CustomerDepositsLiability, amount),
                Posting::credit(AccountRole::Cash, amount),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, account = %account, %amount, "Withdrawal recorded");
        Ok(id)
    }

    /// Move funds between two member accounts through transfer clearing.
    ///
    /// Four lines: the source leg clears against the clearing account and
    /// the destination leg clears back out of it, so the clearing balance
    /// nets to zero.
    pub async fn record_transfer(
        &self,
        ctx: &PostingContext,
        from: CustomerAccountId,
        to: CustomerAccountId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;
        if from == to {
            return Err(IntegrationError::invalid(
                "to",
                "source and destination accounts must differ",
            ));
        }

        let entry = ctx.entry(
            format!("Transfer from account {from} to account {to}"),
            [
                Posting::debit(AccountRole::CustomerDepositsLiability, amount)
                    .with_description(format!("From account {from}")),
                Posting::credit(AccountRole::TransferClearing, amount),
                Posting::debit(AccountRole::TransferClearing, amount),
                Posting::credit(AccountRole::CustomerDepositsLiability, amount)
                    .with_description(format!("To account {to}")),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, from = %from, to = %to, %amount, "Transfer recorded");
        Ok(id)
    }
}
