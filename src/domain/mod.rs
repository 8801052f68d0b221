//! Domain layer - Core orchestration rules
//!
//! This layer contains:
//! - Signaling events and their decoding
//! - Leg/conversation correlation over the key-value store port
//! - Call control actions over the conversation service port

pub mod call_control;
pub mod conversation;
pub mod correlation;
pub mod event;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
