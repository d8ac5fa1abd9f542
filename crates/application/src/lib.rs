//! Application layer - Use cases and orchestration
//!
//! Hosts the conversation agent, the speech synthesis and recognition
//! services and the integration service handlers. Vendor access goes through
//! the ports defined here; adapters in the infrastructure layer implement
//! them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
