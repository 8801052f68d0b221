//! Legwork - call-leg orchestration for a conversation service
//!
//! Signaling events from the conversation backend drive a small call flow
//! (admit knocking parties, play a prompt once audio is up) while a key-value
//! index tracks which legs belong to which conversation.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
