//! Collaborator contracts the engine consumes.

pub mod error;
pub mod gateway;

pub use error::GatewayError;
pub use gateway::LedgerGateway;
