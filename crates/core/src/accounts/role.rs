//! Semantic account roles.
//!
//! Adapters never name a ledger account directly. They ask for a role and
//! the chart of accounts maps it to whatever account the institution uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed vocabulary of account roles the posting rules refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountRole {
    /// Vault and bank cash.
    Cash,
    /// Member savings and current account balances owed to customers.
    CustomerDepositsLiability,
    /// Suspense account that both legs of an internal transfer pass through.
    TransferClearing,
    /// Principal owed by borrowers.
    LoansReceivable,
    /// Interest earned on loans.
    InterestIncome,
    /// Late-payment penalties assessed but not yet collected.
    PenaltyReceivable,
    /// Late-payment penalty income.
    PenaltyIncome,
    /// Borrower money received beyond what the loan owed.
    LoanOverpaymentLiability,
    /// Contra-asset provision against loan losses.
    AllowanceForLoanLosses,
    /// Fixed assets at cost.
    FixedAssets,
    /// Contra-asset of depreciation charged to date.
    AccumulatedDepreciation,
    /// Periodic depreciation charge.
    DepreciationExpense,
    /// Gain on disposal of a fixed asset.
    GainOnAssetDisposal,
    /// Loss on disposal of a fixed asset.
    LossOnAssetDisposal,
    /// Gross salaries.
    SalariesExpense,
    /// Employer share of statutory contributions.
    EmployerContributionsExpense,
    /// Net pay owed to employees.
    SalariesPayable,
    /// Income tax withheld from employees.
    PayrollTaxPayable,
    /// Statutory deductions owed to funds (employee and employer share).
    StatutoryDeductionsPayable,
}

impl AccountRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Cash,
        Self::CustomerDepositsLiability,
        Self::TransferClearing,
        Self::LoansReceivable,
        Self::InterestIncome,
        Self::PenaltyReceivable,
        Self::PenaltyIncome,
        Self::LoanOverpaymentLiability,
        Self::AllowanceForLoanLosses,
        Self::FixedAssets,
        Self::AccumulatedDepreciation,
        Self::DepreciationExpense,
        Self::GainOnAssetDisposal,
        Self::LossOnAssetDisposal,
        Self::SalariesExpense,
        Self::EmployerContributionsExpense,
        Self::SalariesPayable,
        Self::PayrollTaxPayable,
        Self::StatutoryDeductionsPayable,
    ];

    /// Returns the kebab-case name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CustomerDepositsLiability => "customer-deposits-liability",
            Self::TransferClearing => "transfer-clearing",
            Self::LoansReceivable => "loans-receivable",
            Self::InterestIncome => "interest-income",
            Self::PenaltyReceivable => "penalty-receivable",
            Self::PenaltyIncome => "penalty-income",
            Self::LoanOverpaymentLiability => "loan-overpayment-liability",
            Self::AllowanceForLoanLosses => "allowance-for-loan-losses",
            Self::FixedAssets => "fixed-assets",
            Self::AccumulatedDepreciation => "accumulated-depreciation",
            Self::DepreciationExpense => "depreciation-expense",
            Self::GainOnAssetDisposal => "gain-on-asset-disposal",
            Self::LossOnAssetDisposal => "loss-on-asset-disposal",
            Self::SalariesExpense => "salaries-expense",
            Self::EmployerContributionsExpense => "employer-contributions-expense",
            Self::SalariesPayable => "salaries-payable",
            Self::PayrollTaxPayable => "payroll-tax-payable",
            Self::StatutoryDeductionsPayable => "statutory-deductions-payable",
        }
    }

    /// Parses a role name.
    ///
    /// Case-insensitive; underscores are accepted in place of hyphens so
    /// that names coming from environment variables resolve too.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|role| role.as_str() == normalized)
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
