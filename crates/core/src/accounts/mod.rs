//! Chart of accounts: the role vocabulary and the resolver seam.

pub mod resolver;
pub mod role;

pub use resolver::{ChartOfAccountResolver, ChartOfAccounts};
pub use role::AccountRole;
