use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Loan calculations for the cooperative ledger
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(about = "Loan schedules, payoff quotes, allocations, and delinquency checks", long_about = None)]
pub struct CliArgs {
    /// Calculation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available calculations. Every command prints JSON to stdout.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fixed monthly installment for a loan
    Emi(LoanArgs),

    /// Full amortization schedule with totals
    Schedule(LoanArgs),

    /// Early repayment quote as of a date
    Payoff(PayoffArgs),

    /// Split a payment across penalty, interest, and principal
    Allocate(AllocateArgs),

    /// Delinquency status of a loan on a date
    Classify(ClassifyArgs),
}

/// Loan terms shared by several commands.
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Amount disbursed
    #[arg(long, value_name = "AMOUNT")]
    pub principal: Decimal,

    /// Annual interest rate in percent (15 means 15%)
    #[arg(long, value_name = "PERCENT")]
    pub rate: Decimal,

    /// Number of monthly installments
    #[arg(long, value_name = "MONTHS")]
    pub tenor: u32,

    /// Disbursement date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,
}

/// Inputs for an early repayment quote.
#[derive(Args, Debug)]
pub struct PayoffArgs {
    /// Original principal
    #[arg(long, value_name = "AMOUNT")]
    pub principal: Decimal,

    /// Principal already repaid
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    pub paid: Decimal,

    /// Annual interest rate in percent
    #[arg(long, value_name = "PERCENT")]
    pub rate: Decimal,

    /// Disbursement date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub disbursed: NaiveDate,

    /// Repayment date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub on: NaiveDate,
}

/// Inputs for a payment allocation.
#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Amount received
    #[arg(long, value_name = "AMOUNT")]
    pub payment: Decimal,

    /// Outstanding principal
    #[arg(long, value_name = "AMOUNT")]
    pub principal: Decimal,

    /// Accrued unpaid interest
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    pub interest: Decimal,

    /// Accrued unpaid penalty
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    pub penalty: Decimal,
}

/// Inputs for a delinquency check.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Loan terms; `--start` is required here
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Number of installments already paid in full
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub paid_installments: u32,

    /// Evaluation date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: NaiveDate,

    /// Daily penalty rate in percent; defaults to the configured rate
    #[arg(long, value_name = "PERCENT")]
    pub penalty_rate: Option<Decimal>,
}

/// Parse command-line arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
