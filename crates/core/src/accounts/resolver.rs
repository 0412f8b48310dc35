//! Chart-of-accounts lookup.

use std::collections::HashMap;

use hearth_shared::types::AccountId;

use super::role::AccountRole;
use crate::ledger::LedgerError;

/// Maps an account role to the ledger account that backs it.
///
/// Implementations are read-only lookups and must be safe to share across
/// threads.
pub trait ChartOfAccountResolver: Send + Sync {
    /// Resolves `role` to an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the role has no mapping.
    fn resolve(&self, role: AccountRole) -> Result<AccountId, LedgerError>;
}

impl<R: ChartOfAccountResolver + ?Sized> ChartOfAccountResolver for &R {
    fn resolve(&self, role: AccountRole) -> Result<AccountId, LedgerError> {
        (**self).resolve(role)
    }
}

impl<R: ChartOfAccountResolver + ?Sized> ChartOfAccountResolver for std::sync::Arc<R> {
    fn resolve(&self, role: AccountRole) -> Result<AccountId, LedgerError> {
        (**self).resolve(role)
    }
}

/// A chart held in memory as a role-to-account map.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountRole, AccountId>,
}

impl ChartOfAccounts {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the mapping for `role`.
    #[must_use]
    pub fn with(mut self, role: AccountRole, account: AccountId) -> Self {
        self.accounts.insert(role, account);
        self
    }

    /// Adds or replaces the mapping for `role`.
    pub fn insert(&mut self, role: AccountRole, account: AccountId) {
        self.accounts.insert(role, account);
    }

    /// Roles with no mapping, in vocabulary order.
    #[must_use]
    pub fn missing_roles(&self) -> Vec<AccountRole> {
        AccountRole::ALL
            .into_iter()
            .filter(|role| !self.accounts.contains_key(role))
            .collect()
    }

    /// Number of mapped roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no role is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<(AccountRole, AccountId)> for ChartOfAccounts {
    fn from_iter<I: IntoIterator<Item = (AccountRole, AccountId)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}

impl ChartOfAccountResolver for ChartOfAccounts {
    fn resolve(&self, role: AccountRole) -> Result<AccountId, LedgerError> {
        self.accounts
            .get(&role)
            .copied()
            .ok_or(LedgerError::AccountNotFound(role))
    }
}
