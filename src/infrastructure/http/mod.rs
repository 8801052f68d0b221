//! Outbound HTTP integrations

pub mod conversation_client;

pub use conversation_client::HttpConversationClient;
