//! Leg/conversation correlation index
//!
//! Two kinds of entries live in the correlation store:
//!
//! - `leg:<leg_id>` holds the id of the conversation the leg was last seen in.
//! - `clegs:<conversation_id>` holds a JSON object mapping every leg reported
//!   under that conversation to its latest status.
//!
//! Updates to the conversation map are a plain read-merge-write against the
//! store. There is no compare-and-swap: two updates for the same conversation
//! racing each other can lose one leg (last writer wins).

use super::shared::{ConversationId, DomainError, LegId, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const LEG_KEY_PREFIX: &str = "leg:";
pub const CONVERSATION_LEGS_KEY_PREFIX: &str = "clegs:";

/// Decoded value of a `clegs:` entry: leg id → status
pub type ConversationLegs = BTreeMap<String, String>;

pub fn leg_key(leg_id: &LegId) -> String {
    format!("{}{}", LEG_KEY_PREFIX, leg_id)
}

pub fn conversation_legs_key(conversation_id: &ConversationId) -> String {
    format!("{}{}", CONVERSATION_LEGS_KEY_PREFIX, conversation_id)
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Correlation store error: {0}")]
    Backend(String),

    #[error("Correlation store timed out after {0:?}")]
    Timeout(Duration),
}

/// Key-value backend holding the correlation index
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Get a value, `None` when the key was never written
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;

    /// Set a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
}

/// Reads and maintains the leg ↔ conversation index
#[derive(Clone)]
pub struct LegCorrelator {
    store: Arc<dyn CorrelationStore>,
}

impl LegCorrelator {
    pub fn new(store: Arc<dyn CorrelationStore>) -> Self {
        Self { store }
    }

    /// Record the latest status of a leg and return the merged map for its
    /// conversation.
    pub async fn record_leg_status(
        &self,
        leg_id: &LegId,
        conversation_id: &ConversationId,
        status: &str,
    ) -> Result<ConversationLegs> {
        self.store
            .set(&leg_key(leg_id), conversation_id.as_str())
            .await?;

        let key = conversation_legs_key(conversation_id);
        let mut legs = match self.store.get(&key).await? {
            Some(raw) => decode_legs(&key, &raw)?,
            None => ConversationLegs::new(),
        };
        debug!(
            "Conversation {} had {} legs before update of {}",
            conversation_id,
            legs.len(),
            leg_id
        );

        legs.insert(leg_id.to_string(), status.to_string());

        let encoded = serde_json::to_string(&legs).map_err(|e| DomainError::CorruptCorrelation {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&key, &encoded).await?;

        Ok(legs)
    }

    /// Raw, undecoded `clegs:` value for a conversation
    pub async fn conversation_legs_raw(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&conversation_legs_key(conversation_id))
            .await?)
    }
}

fn decode_legs(key: &str, raw: &str) -> Result<ConversationLegs> {
    serde_json::from_str(raw).map_err(|e| DomainError::CorruptCorrelation {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
