//! Chart of accounts loaded from configuration.

use hearth_core::accounts::{AccountRole, ChartOfAccountResolver, ChartOfAccounts};
use hearth_core::ledger::LedgerError;
use hearth_shared::types::AccountId;
use hearth_shared::{AppError, ChartConfig};
use tracing::{info, warn};

/// A [`ChartOfAccountResolver`] built from the `[chart.accounts]` table.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredChart {
    accounts: ChartOfAccounts,
}

impl ConfiguredChart {
    /// Builds the chart from configuration.
    ///
    /// Roles missing from the table are allowed; resolving one fails with
    /// `AccountNotFound` at posting time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if a key is not a known role name.
    pub fn from_config(config: &ChartConfig) -> Result<Self, AppError> {
        let mut accounts = ChartOfAccounts::new();
        for (name, account) in &config.accounts {
            let role = AccountRole::parse(name).ok_or_else(|| {
                AppError::Configuration(format!("unknown account role '{name}' in chart"))
            })?;
            accounts.insert(role, AccountId::from_uuid(*account));
        }

        let missing = accounts.missing_roles();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|role| role.as_str()).collect();
            warn!(missing = ?names, "Chart of accounts is incomplete");
        }
        info!(mapped = accounts.len(), "Chart of accounts loaded");

        Ok(Self { accounts })
    }

    /// Roles with no configured account.
    #[must_use]
    pub fn missing_roles(&self) -> Vec<AccountRole> {
        self.accounts.missing_roles()
    }
}

impl From<ChartOfAccounts> for ConfiguredChart {
    fn from(accounts: ChartOfAccounts) -> Self {
        Self { accounts }
    }
}

impl ChartOfAccountResolver for ConfiguredChart {
    fn resolve(&self, role: AccountRole) -> Result<AccountId, LedgerError> {
        self.accounts.resolve(role)
    }
}
