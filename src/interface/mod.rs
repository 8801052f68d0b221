//! Interface layer - External interfaces
//!
//! This layer handles:
//! - The signaling event ingress
//! - Query/control REST endpoints
//! - Request/response formatting

pub mod api;
