//! Fixed asset postings.

use hearth_shared::types::{FixedAssetId, JournalEntryId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{IntegrationError, require_non_negative, require_positive};
use super::pipeline::{PostingContext, PostingPipeline};
use crate::accounts::{AccountRole, ChartOfAccountResolver};
use crate::ledger::Posting;
use crate::ports::LedgerGateway;

/// Straight-line monthly depreciation, rounded to the minor unit.
///
/// `(cost - salvage_value) / useful_life_months`
///
/// # Errors
///
/// Returns `InvalidArgument` if `cost <= 0`, `salvage_value` is negative or
/// above cost, or `useful_life_months == 0`.
pub fn straight_line_monthly_depreciation(
    cost: Decimal,
    salvage_value: Decimal,
    useful_life_months: u32,
) -> Result<Decimal, IntegrationError> {
    require_positive("cost", cost)?;
    require_non_negative("salvage_value", salvage_value)?;
    if salvage_value > cost {
        return Err(IntegrationError::invalid(
            "salvage_value",
            format!("{salvage_value} exceeds cost {cost}"),
        ));
    }
    if useful_life_months == 0 {
        return Err(IntegrationError::invalid(
            "useful_life_months",
            "must be at least one month",
        ));
    }

    Ok(round_money(
        (cost - salvage_value) / Decimal::from(useful_life_months),
    ))
}

/// Carrying amounts of an asset at disposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDisposal {
    /// The asset.
    pub asset_id: FixedAssetId,
    /// Original cost.
    pub cost: Decimal,
    /// Depreciation charged to date.
    pub accumulated_depreciation: Decimal,
    /// Cash received.
    pub proceeds: Decimal,
}

impl AssetDisposal {
    /// Cost less accumulated depreciation.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.cost - self.accumulated_depreciation
    }

    /// Proceeds less book value; negative for a loss.
    #[must_use]
    pub fn gain_or_loss(&self) -> Decimal {
        self.proceeds - self.book_value()
    }
}

/// A posted disposal and its gain (positive) or loss (negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposalRecorded {
    /// The posted entry.
    pub entry_id: JournalEntryId,
    /// Proceeds less book value.
    pub gain_or_loss: Decimal,
}

/// Posts fixed asset acquisitions, depreciation, and disposals.
pub struct FixedAssetAdapter<G, R> {
    pipeline: PostingPipeline<G, R>,
}

impl<G: LedgerGateway, R: ChartOfAccountResolver> FixedAssetAdapter<G, R> {
    /// Create an adapter over a posting pipeline.
    #[must_use]
    pub fn new(pipeline: PostingPipeline<G, R>) -> Self {
        Self { pipeline }
    }

    /// Asset bought for cash.
    ///
    /// Debit fixed assets, credit cash.
    pub async fn record_acquisition(
        &self,
        ctx: &PostingContext,
        asset_id: FixedAssetId,
        cost: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("cost", cost)?;

        let entry = ctx.entry(
            format!("Acquisition of asset {asset_id}"),
            [
                Posting::debit(AccountRole::FixedAssets, cost),
                Posting::credit(AccountRole::Cash, cost),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, asset_id = %asset_id, %cost, "Asset acquisition recorded");
        Ok(id)
    }

    /// One period's depreciation charge.
    ///
    /// Debit depreciation expense, credit accumulated depreciation.
    pub async fn record_depreciation(
        &self,
        ctx: &PostingContext,
        asset_id: FixedAssetId,
        amount: Decimal,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("amount", amount)?;

        let entry = ctx.entry(
            format!("Depreciation of asset {asset_id}"),
            [
                Posting::debit(AccountRole::DepreciationExpense, amount),
                Posting::credit(AccountRole::AccumulatedDepreciation, amount),
            ],
        );
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(entry_id = %id, asset_id = %asset_id, %amount, "Depreciation recorded");
        Ok(id)
    }

    /// Asset sold or scrapped.
    ///
    /// Debit cash (proceeds) and accumulated depreciation, credit fixed
    /// assets at cost, then credit a gain or debit a loss for the
    /// difference. Zero amounts produce no line, so a disposal exactly at
    /// book value has no gain or loss line.
    pub async fn record_disposal(
        &self,
        ctx: &PostingContext,
        disposal: &AssetDisposal,
    ) -> Result<DisposalRecorded, IntegrationError> {
        require_positive("cost", disposal.cost)?;
        require_non_negative("accumulated_depreciation", disposal.accumulated_depreciation)?;
        require_non_negative("proceeds", disposal.proceeds)?;
        if disposal.accumulated_depreciation > disposal.cost {
            return Err(IntegrationError::invalid(
                "accumulated_depreciation",
                format!(
                    "{} exceeds cost {}",
                    disposal.accumulated_depreciation, disposal.cost
                ),
            ));
        }

        let gain_or_loss = disposal.gain_or_loss();
        let result_line = if gain_or_loss > Decimal::ZERO {
            Posting::credit(AccountRole::GainOnAssetDisposal, gain_or_loss)
        } else {
            Posting::debit(AccountRole::LossOnAssetDisposal, -gain_or_loss)
        };

        let postings = [
            Posting::debit(AccountRole::Cash, disposal.proceeds),
            Posting::debit(
                AccountRole::AccumulatedDepreciation,
                disposal.accumulated_depreciation,
            ),
            Posting::credit(AccountRole::FixedAssets, disposal.cost),
            result_line,
        ]
        .into_iter()
        .filter(|p| !p.amount.is_zero());

        let entry = ctx.entry(format!("Disposal of asset {}", disposal.asset_id), postings);
        let entry_id = self.pipeline.record(entry, ctx.actor).await?;

        info!(
            entry_id = %entry_id,
            asset_id = %disposal.asset_id,
            proceeds = %disposal.proceeds,
            gain_or_loss = %gain_or_loss,
            "Asset disposal recorded"
        );
        Ok(DisposalRecorded {
            entry_id,
            gain_or_loss,
        })
    }
}
