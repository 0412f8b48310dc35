//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MINOR_UNIT, MINOR_UNIT_DIGITS, is_minor_unit_precise, round_money, within_minor_unit};
