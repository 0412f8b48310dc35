//! Journal entry lifecycle management.
//!
//! This module implements the entry lifecycle state machine and the
//! reversal of posted entries.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (WorkflowAction, AuditRecord)
//! - `error` - Workflow-specific error types
//! - `lifecycle` - State transition logic
//! - `reversal` - Reversing entry creation

pub mod error;
pub mod lifecycle;
pub mod reversal;
pub mod types;

#[cfg(test)]
mod lifecycle_props;

pub use error::WorkflowError;
pub use lifecycle::JournalEntryLifecycle;
pub use reversal::ReversalOutcome;
pub use types::{AuditRecord, WorkflowAction};
