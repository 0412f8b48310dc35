//! Core ledger engine for Hearth.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Loan money math, journal entry construction, and the entry lifecycle live
//! here; storage is reached only through the `ports` traits.
//!
//! # Modules
//!
//! - `loan` - Amortization, payment allocation, delinquency classification
//! - `accounts` - Account roles and the chart-of-accounts resolver
//! - `ledger` - Double-entry journal entries and balance validation
//! - `workflow` - Journal entry lifecycle and reversals
//! - `ports` - Persistence gateway contract
//! - `integration` - Banking, loan, payroll, and fixed asset adapters

pub mod accounts;
pub mod integration;
pub mod ledger;
pub mod loan;
pub mod ports;
pub mod workflow;
