use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use hearth_core::loan::{
    AmortizationCalculator, AmortizationInstallment, DelinquencyClassifier, DelinquencyStatus,
    EarlyRepaymentQuote, LoanSnapshot, LoanStatus, LoanTerms, PaymentAllocation,
    PaymentAllocationEngine, ScheduledInstallment,
};
use hearth_shared::types::LoanId;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::args::{AllocateArgs, ClassifyArgs, Command, LoanArgs, PayoffArgs};

/// Output of `emi`.
#[derive(Debug, Serialize)]
pub struct EmiOutput {
    pub emi: Decimal,
    pub total_interest: Decimal,
    pub total_repayable: Decimal,
}

/// Output of `schedule`.
#[derive(Debug, Serialize)]
pub struct ScheduleOutput {
    pub terms: LoanTerms,
    pub emi: Decimal,
    pub total_interest: Decimal,
    pub total_repayable: Decimal,
    pub installments: Vec<AmortizationInstallment>,
}

/// Run one command and render its result as pretty JSON.
pub fn run(command: &Command, default_penalty_rate: Decimal) -> Result<String> {
    let json = match command {
        Command::Emi(args) => serde_json::to_string_pretty(&emi(args)?)?,
        Command::Schedule(args) => serde_json::to_string_pretty(&schedule(args)?)?,
        Command::Payoff(args) => serde_json::to_string_pretty(&payoff(args)?)?,
        Command::Allocate(args) => serde_json::to_string_pretty(&allocate(args)?)?,
        Command::Classify(args) => {
            serde_json::to_string_pretty(&classify(args, default_penalty_rate)?)?
        }
    };
    Ok(json)
}

fn terms(args: &LoanArgs) -> Result<LoanTerms> {
    let start = args.start.unwrap_or_else(|| Utc::now().date_naive());
    Ok(LoanTerms::new(args.principal, args.rate, args.tenor, start)?)
}

pub fn emi(args: &LoanArgs) -> Result<EmiOutput> {
    let terms = terms(args)?;
    Ok(EmiOutput {
        emi: AmortizationCalculator::calculate_emi(
            terms.principal,
            terms.annual_rate_percent,
            terms.tenor_months,
        )?,
        total_interest: AmortizationCalculator::calculate_total_interest(&terms)?,
        total_repayable: AmortizationCalculator::calculate_total_repayable(&terms)?,
    })
}

pub fn schedule(args: &LoanArgs) -> Result<ScheduleOutput> {
    let terms = terms(args)?;
    let installments = AmortizationCalculator::generate_schedule(&terms)?;
    let total_interest: Decimal = installments.iter().map(|i| i.interest_payment).sum();
    debug!(installments = installments.len(), "Schedule generated");

    Ok(ScheduleOutput {
        terms,
        emi: AmortizationCalculator::calculate_emi(
            terms.principal,
            terms.annual_rate_percent,
            terms.tenor_months,
        )?,
        total_interest,
        total_repayable: terms.principal + total_interest,
        installments,
    })
}

pub fn payoff(args: &PayoffArgs) -> Result<EarlyRepaymentQuote> {
    Ok(AmortizationCalculator::calculate_early_repayment(
        args.principal,
        args.paid,
        args.rate,
        args.disbursed,
        args.on,
    )?)
}

pub fn allocate(args: &AllocateArgs) -> Result<PaymentAllocation> {
    Ok(PaymentAllocationEngine::allocate_payment(
        args.payment,
        args.principal,
        args.interest,
        args.penalty,
    )?)
}

/// Builds the loan as of `paid_installments` full payments and checks it.
pub fn classify(args: &ClassifyArgs, default_penalty_rate: Decimal) -> Result<DelinquencyStatus> {
    let start = args
        .loan
        .start
        .context("--start is required to place installment due dates")?;
    let terms = LoanTerms::new(args.loan.principal, args.loan.rate, args.loan.tenor, start)?;
    let classifier = DelinquencyClassifier::new(args.penalty_rate.unwrap_or(default_penalty_rate))?;

    let loan = snapshot(&terms, args.paid_installments)?;
    Ok(classifier.check(&loan, args.today)?)
}

fn snapshot(terms: &LoanTerms, paid_installments: u32) -> Result<LoanSnapshot> {
    let schedule = AmortizationCalculator::generate_schedule(terms)?;

    let installments: Vec<ScheduledInstallment> = schedule
        .iter()
        .map(|i| ScheduledInstallment {
            installment_number: i.installment_number,
            due_date: i.due_date,
            amount_due: i.total_payment,
            amount_paid: if i.installment_number <= paid_installments {
                i.total_payment
            } else {
                Decimal::ZERO
            },
        })
        .collect();
    let next_payment_date: Option<NaiveDate> = installments
        .iter()
        .find(|i| !i.unpaid().is_zero())
        .map(|i| i.due_date);
    let outstanding_principal = schedule
        .iter()
        .take_while(|i| i.installment_number <= paid_installments)
        .last()
        .map_or(terms.principal, |i| i.remaining_balance);

    Ok(LoanSnapshot {
        loan_id: LoanId::new(),
        status: if next_payment_date.is_some() {
            LoanStatus::Active
        } else {
            LoanStatus::Closed
        },
        terms: *terms,
        next_payment_date,
        installments,
        outstanding_principal,
        accrued_interest: Decimal::ZERO,
        penalty_due: Decimal::ZERO,
        last_classification: None,
    })
}
