//! Shared types, errors, and configuration for Hearth.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money precision helpers (minor-unit rounding and tolerance)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ChartConfig, LedgerConfig, LoggingConfig};
pub use error::{AppError, AppResult};
