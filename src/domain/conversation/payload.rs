//! Request bodies sent to the conversation service

use crate::domain::event::Channel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of an add-member request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberJoin {
    pub user: MemberUser,
    pub knocking_id: String,
    pub state: String,
    pub channel: MemberChannel,
    pub media: MemberMediaCapability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberUser {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberChannel {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    pub preanswer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberMediaCapability {
    pub audio: bool,
}

impl MemberJoin {
    /// Join a knocking party straight into the `joined` state with audio,
    /// skipping pre-answer.
    pub fn joined(user_id: &str, knocking_id: &str, channel: &Channel) -> Self {
        Self {
            user: MemberUser {
                id: user_id.to_string(),
            },
            knocking_id: knocking_id.to_string(),
            state: "joined".to_string(),
            channel: MemberChannel {
                kind: channel.kind.clone(),
                id: channel.id.clone(),
                to: channel.to.clone(),
                from: channel.from.clone(),
                preanswer: false,
            },
            media: MemberMediaCapability { audio: true },
        }
    }
}

/// Body of a leg talk (text-to-speech) request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkAction {
    #[serde(rename = "loop")]
    pub loops: u32,
    pub text: String,
    pub level: i32,
    pub voice_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_join_body() {
        let channel = Channel {
            kind: "phone".to_string(),
            id: "leg-k".to_string(),
            to: Some(json!({ "type": "phone", "number": "100" })),
            from: None,
        };

        let body = serde_json::to_value(MemberJoin::joined("USR-1", "KNOCK-1", &channel)).unwrap();

        assert_eq!(
            body,
            json!({
                "user": { "id": "USR-1" },
                "knocking_id": "KNOCK-1",
                "state": "joined",
                "channel": {
                    "type": "phone",
                    "id": "leg-k",
                    "to": { "type": "phone", "number": "100" },
                    "preanswer": false
                },
                "media": { "audio": true }
            })
        );
    }

    #[test]
    fn test_talk_action_uses_loop_keyword() {
        let talk = TalkAction {
            loops: 1,
            text: "hi".to_string(),
            level: 0,
            voice_name: "Kimberly".to_string(),
        };
        let body = serde_json::to_value(talk).unwrap();
        assert_eq!(body["loop"], 1);
        assert_eq!(body["voice_name"], "Kimberly");
    }
}
