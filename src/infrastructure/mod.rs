//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Correlation store backends (in-memory, Redis)
//! - The HTTP client for the conversation service

pub mod http;
pub mod storage;
