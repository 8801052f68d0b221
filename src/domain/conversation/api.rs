//! Conversation service endpoints used by the orchestration core

use super::payload::{MemberJoin, TalkAction};
use super::{ConversationService, ServiceError, ServiceRequest};
use crate::domain::shared::{ConversationId, DomainError, LegId, Result};
use serde_json::{json, Value};
use std::sync::Arc;

/// Where the conversation endpoints live
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    /// Conversation service datacenter, e.g. `https://api.nexmo.com`
    pub base_url: String,
    /// Service answering `GET /conversations/<name>` with a conversation to
    /// join knocking parties into
    pub provisioning_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>, provisioning_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            provisioning_url: provisioning_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Typed calls against the conversation service.
///
/// Two API versions are in use: `v0.3` for conversations, members and talk,
/// `v0.1` for leg hangup.
#[derive(Clone)]
pub struct ConversationApi {
    service: Arc<dyn ConversationService>,
    endpoints: Endpoints,
}

impl ConversationApi {
    pub fn new(service: Arc<dyn ConversationService>, endpoints: Endpoints) -> Self {
        Self { service, endpoints }
    }

    /// Obtain the named conversation that knocking parties are joined into
    pub async fn provision_conversation(&self, name: &str) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::get(format!(
                "{}/conversations/{}",
                self.endpoints.provisioning_url, name
            )))
            .await
    }

    /// List conversations filtered by name
    pub async fn find_conversations(&self, name: &str) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(
                ServiceRequest::get(format!("{}/v0.3/conversations", self.endpoints.base_url))
                    .with_query("name", name),
            )
            .await
    }

    pub async fn get_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::get(format!(
                "{}/v0.3/conversations/{}",
                self.endpoints.base_url, conversation_id
            )))
            .await
    }

    pub async fn create_conversation(&self, name: &str) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::post(
                format!("{}/v0.3/conversations", self.endpoints.base_url),
                json!({ "name": name }),
            ))
            .await
    }

    pub async fn add_member(
        &self,
        conversation_id: &ConversationId,
        member: &MemberJoin,
    ) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::post(
                format!(
                    "{}/v0.3/conversations/{}/members",
                    self.endpoints.base_url, conversation_id
                ),
                to_body(member)?,
            ))
            .await
    }

    /// Start text-to-speech on a leg
    pub async fn talk(&self, leg_id: &LegId, talk: &TalkAction) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::post(
                format!("{}/v0.3/legs/{}/talk", self.endpoints.base_url, leg_id),
                to_body(talk)?,
            ))
            .await
    }

    pub async fn hangup_leg(&self, leg_id: &LegId) -> std::result::Result<Value, ServiceError> {
        self.service
            .request(ServiceRequest::put(
                format!("{}/v0.1/legs/{}", self.endpoints.base_url, leg_id),
                json!({ "action": "hangup", "uuid": leg_id }),
            ))
            .await
    }
}

fn to_body<T: serde::Serialize>(body: &T) -> std::result::Result<Value, ServiceError> {
    serde_json::to_value(body).map_err(|e| ServiceError::Transport(e.to_string()))
}

/// `id` of a conversation representation
pub fn conversation_id_of(conversation: &Value) -> Result<ConversationId> {
    conversation
        .get("id")
        .and_then(Value::as_str)
        .map(ConversationId::new)
        .ok_or_else(|| DomainError::UnexpectedResponse("conversation without `id`".to_string()))
}
