//! Storage layer for Hearth.
//!
//! This crate provides:
//! - An in-memory [`LedgerGateway`](hearth_core::ports::LedgerGateway)
//!   with optimistic version checks on journal entries
//! - A chart of accounts built from application configuration

pub mod chart;
pub mod gateway;

pub use chart::ConfiguredChart;
pub use gateway::InMemoryGateway;
