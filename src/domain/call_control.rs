//! Call control actions driven by signaling events

use super::conversation::api::conversation_id_of;
use super::conversation::{ConversationApi, MemberJoin, TalkAction};
use super::event::{AudioSayDone, Knocking};
use super::shared::{ConversationId, LegId, Result};
use tracing::info;

/// Fixed parameters of the call flow
#[derive(Debug, Clone, PartialEq)]
pub struct CallFlowSettings {
    /// Conversation every knocking party is joined into
    pub conversation_name: String,
    /// Prompt played once a member's audio is up
    pub prompt: TalkAction,
}

impl Default for CallFlowSettings {
    fn default() -> Self {
        Self {
            conversation_name: "dog".to_string(),
            prompt: TalkAction {
                loops: 1,
                text: "Hello, have a nice day! ".to_string(),
                level: 0,
                voice_name: "Kimberly".to_string(),
            },
        }
    }
}

pub struct CallControl {
    api: ConversationApi,
    settings: CallFlowSettings,
}

impl CallControl {
    pub fn new(api: ConversationApi, settings: CallFlowSettings) -> Self {
        Self { api, settings }
    }

    /// Admit a knocking party: obtain the call flow's conversation, then add
    /// the knocker to it as a joined member with audio.
    pub async fn join_knocker(&self, knock: &Knocking) -> Result<ConversationId> {
        let conversation = self
            .api
            .provision_conversation(&self.settings.conversation_name)
            .await?;
        let conversation_id = conversation_id_of(&conversation)?;

        let member = MemberJoin::joined(&knock.body.user.id, &knock.from, &knock.body.channel);
        self.api.add_member(&conversation_id, &member).await?;

        info!(
            "Knocker {} joined conversation {} as user {}",
            knock.from, conversation_id, knock.body.user.id
        );
        Ok(conversation_id)
    }

    /// Play the configured prompt on a leg
    pub async fn start_prompt(&self, leg_id: &LegId) -> Result<()> {
        self.api.talk(leg_id, &self.settings.prompt).await?;
        info!("Prompt started on leg {}", leg_id);
        Ok(())
    }

    /// Prompt playback finished. Nothing happens yet; this is where hanging
    /// up the leg after the prompt belongs.
    pub async fn on_prompt_done(&self, _event: &AudioSayDone) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{
        Endpoints, Method, MockConversationService, ServiceError,
    };
    use crate::domain::event::{Channel, KnockingBody, KnockingUser};
    use crate::domain::shared::DomainError;
    use mockall::Sequence;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn control(service: MockConversationService) -> CallControl {
        CallControl::new(
            ConversationApi::new(
                Arc::new(service),
                Endpoints::new("https://api.example.com", "http://localhost:5001"),
            ),
            CallFlowSettings::default(),
        )
    }

    fn knock() -> Knocking {
        Knocking {
            from: "KNOCK-1".to_string(),
            body: KnockingBody {
                channel: Channel {
                    kind: "phone".to_string(),
                    id: "leg-k".to_string(),
                    to: Some(json!({ "type": "phone", "number": "100" })),
                    from: Some(json!({ "type": "phone", "number": "200" })),
                },
                user: KnockingUser {
                    id: "USR-1".to_string(),
                },
            },
        }
    }

    #[tokio::test]
    async fn test_knocker_is_joined_into_provisioned_conversation() {
        let mut service = MockConversationService::new();
        let mut seq = Sequence::new();
        service
            .expect_request()
            .withf(|req| req.url == "http://localhost:5001/conversations/dog")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "id": "CON-1", "name": "dog" })));
        service
            .expect_request()
            .withf(|req| {
                let Some(body) = req.data.as_ref() else {
                    return false;
                };
                req.method == Method::Post
                    && req.url == "https://api.example.com/v0.3/conversations/CON-1/members"
                    && body["user"]["id"] == "USR-1"
                    && body["knocking_id"] == "KNOCK-1"
                    && body["state"] == "joined"
                    && body["channel"]["id"] == "leg-k"
                    && body["channel"]["from"]["number"] == "200"
                    && body["channel"]["preanswer"] == false
                    && body["media"]["audio"] == true
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json!({ "id": "MEM-1" })));

        let conversation_id = control(service).join_knocker(&knock()).await.unwrap();
        assert_eq!(conversation_id.as_str(), "CON-1");
    }

    #[tokio::test]
    async fn test_failed_provisioning_never_adds_member() {
        let mut service = MockConversationService::new();
        service
            .expect_request()
            .withf(|req| req.url.ends_with("/conversations/dog"))
            .times(1)
            .returning(|_| Err(ServiceError::Transport("connection refused".to_string())));
        service
            .expect_request()
            .withf(|req| req.url.ends_with("/members"))
            .times(0);

        let err = control(service).join_knocker(&knock()).await.unwrap_err();
        assert!(matches!(err, DomainError::Service(ServiceError::Transport(_))));
    }

    #[tokio::test]
    async fn test_prompt_is_sent_to_leg() {
        let mut service = MockConversationService::new();
        service
            .expect_request()
            .withf(|req| {
                req.url == "https://api.example.com/v0.3/legs/leg-m/talk"
                    && req.data
                        == Some(json!({
                            "loop": 1,
                            "text": "Hello, have a nice day! ",
                            "level": 0,
                            "voice_name": "Kimberly"
                        }))
            })
            .times(1)
            .returning(|_| Ok(Value::Null));

        control(service).start_prompt(&LegId::new("leg-m")).await.unwrap();
    }

    #[tokio::test]
    async fn test_prompt_done_does_nothing() {
        let mut service = MockConversationService::new();
        service.expect_request().times(0);

        control(service)
            .on_prompt_done(&AudioSayDone { body: json!({}) })
            .await
            .unwrap();
    }
}
