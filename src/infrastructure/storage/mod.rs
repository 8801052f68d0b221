//! Correlation store backends

pub mod memory;
pub mod redis_store;

pub use memory::InMemoryCorrelationStore;
pub use redis_store::RedisCorrelationStore;
