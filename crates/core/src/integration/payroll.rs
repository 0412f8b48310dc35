//! Payroll run postings.

use hearth_shared::types::{JournalEntryId, PayrollRunId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{IntegrationError, require_non_negative, require_positive};
use super::pipeline::{PostingContext, PostingPipeline};
use crate::accounts::{AccountRole, ChartOfAccountResolver};
use crate::ledger::Posting;
use crate::ports::LedgerGateway;

/// Totals of one payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The run.
    pub run_id: PayrollRunId,
    /// Gross salaries before any deduction.
    pub gross_salaries: Decimal,
    /// Income tax withheld from employees.
    pub income_tax_withheld: Decimal,
    /// Employee share of statutory contributions withheld.
    pub employee_statutory_deductions: Decimal,
    /// Employer share of statutory contributions.
    pub employer_contributions: Decimal,
}

impl PayrollRun {
    /// Pay owed to employees after withholding.
    #[must_use]
    pub fn net_pay(&self) -> Decimal {
        self.gross_salaries - self.income_tax_withheld - self.employee_statutory_deductions
    }
}

/// Posts payroll runs.
pub struct PayrollAdapter<G, R> {
    pipeline: PostingPipeline<G, R>,
}

impl<G: LedgerGateway, R: ChartOfAccountResolver> PayrollAdapter<G, R> {
    /// Create an adapter over a posting pipeline.
    #[must_use]
    pub fn new(pipeline: PostingPipeline<G, R>) -> Self {
        Self { pipeline }
    }

    /// Accrue a payroll run.
    ///
    /// Debits: salaries expense (gross), employer contributions expense.
    /// Credits: salaries payable (net), payroll tax payable, statutory
    /// deductions payable (employee plus employer share). Zero components
    /// produce no line.
    pub async fn record_payroll_run(
        &self,
        ctx: &PostingContext,
        run: &PayrollRun,
    ) -> Result<JournalEntryId, IntegrationError> {
        require_positive("gross_salaries", run.gross_salaries)?;
        require_non_negative("income_tax_withheld", run.income_tax_withheld)?;
        require_non_negative(
            "employee_statutory_deductions",
            run.employee_statutory_deductions,
        )?;
        require_non_negative("employer_contributions", run.employer_contributions)?;

        let net_pay = run.net_pay();
        if net_pay < Decimal::ZERO {
            return Err(IntegrationError::invalid(
                "gross_salaries",
                format!("deductions exceed gross pay by {}", -net_pay),
            ));
        }

        let statutory_payable = run.employee_statutory_deductions + run.employer_contributions;
        let postings = [
            Posting::debit(AccountRole::SalariesExpense, run.gross_salaries),
            Posting::debit(
                AccountRole::EmployerContributionsExpense,
                run.employer_contributions,
            ),
            Posting::credit(AccountRole::SalariesPayable, net_pay),
            Posting::credit(AccountRole::PayrollTaxPayable, run.income_tax_withheld),
            Posting::credit(AccountRole::StatutoryDeductionsPayable, statutory_payable),
        ]
        .into_iter()
        .filter(|p| !p.amount.is_zero());

        let entry = ctx.entry(format!("Payroll run {}", run.run_id), postings);
        let id = self.pipeline.record(entry, ctx.actor).await?;

        info!(
            entry_id = %id,
            run_id = %run.run_id,
            gross = %run.gross_salaries,
            net = %net_pay,
            "Payroll run recorded"
        );
        Ok(id)
    }
}
