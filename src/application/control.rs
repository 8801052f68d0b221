//! Synchronous control and query operations

use super::context::RtcContext;
use crate::domain::conversation::api::conversation_id_of;
use crate::domain::conversation::ConversationApi;
use crate::domain::correlation::LegCorrelator;
use crate::domain::shared::{ConversationId, DomainError, LegId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// `{"message": "ok"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self {
            message: "ok".to_string(),
        }
    }
}

/// Raw correlation map of a conversation, `null` when nothing is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationLegsView {
    #[serde(rename = "convLegs")]
    pub conv_legs: Option<String>,
}

pub struct ControlSurface {
    correlator: LegCorrelator,
    api: ConversationApi,
}

impl ControlSurface {
    pub fn new(context: &RtcContext) -> Self {
        Self {
            correlator: context.correlator(),
            api: context.conversation_api(),
        }
    }

    pub async fn hangup_leg(&self, leg_id: &LegId) -> Result<Acknowledgement> {
        self.api.hangup_leg(leg_id).await?;
        info!("Leg {} hung up", leg_id);
        Ok(Acknowledgement::ok())
    }

    pub async fn list_conversation_legs(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<ConversationLegsView> {
        Ok(ConversationLegsView {
            conv_legs: self.correlator.conversation_legs_raw(conversation_id).await?,
        })
    }

    /// Return the conversation called `name`, creating it when none exists.
    /// When several share the name the first listed one is used.
    pub async fn get_or_create_conversation(&self, name: &str) -> Result<Value> {
        let listing = self.api.find_conversations(name).await?;
        let matches = listing
            .pointer("/_embedded/conversations")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                DomainError::UnexpectedResponse(
                    "conversation listing without `_embedded.conversations`".to_string(),
                )
            })?;

        match matches.first() {
            None => {
                info!("No conversation named {}, creating it", name);
                Ok(self.api.create_conversation(name).await?)
            }
            Some(existing) => {
                let conversation_id = conversation_id_of(existing)?;
                Ok(self.api.get_conversation(&conversation_id).await?)
            }
        }
    }
}
