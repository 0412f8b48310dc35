//! Double-entry journal entries.
//!
//! - `types` - Journal entry, line, posting, and status types
//! - `builder` - Entry construction from role postings and balance validation
//! - `error` - Ledger error types

pub mod builder;
pub mod error;
pub mod types;

#[cfg(test)]
mod builder_props;

pub use builder::JournalEntryBuilder;
pub use error::LedgerError;
pub use types::{
    EntrySide, EntryTotals, JournalEntry, JournalEntryLine, JournalEntryStatus, JournalEntryType,
    NewJournalEntry, Posting,
};
