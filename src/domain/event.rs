//! Signaling events delivered by the conversation backend
//!
//! Raw events arrive as JSON objects carrying a `type` discriminator and a
//! type-specific `body`. They are decoded once, at the boundary, into
//! [`RtcEvent`]. Types this service does not act on decode to
//! [`RtcEvent::Ignored`] instead of failing.

use super::shared::{ConversationId, DomainError, LegId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LEG_STATUS_UPDATE: &str = "leg:status:update";
pub const APP_KNOCKING: &str = "app:knocking";
pub const MEMBER_MEDIA: &str = "member:media";
pub const AUDIO_SAY_DONE: &str = "audio:say:done";

/// A decoded signaling event
#[derive(Debug, Clone, PartialEq)]
pub enum RtcEvent {
    LegStatusUpdate(LegStatusUpdate),
    Knocking(Knocking),
    MemberMedia(MemberMedia),
    AudioSayDone(AudioSayDone),
    /// Any type without a handler
    Ignored { event_type: String },
}

impl RtcEvent {
    /// Decode a raw event. Unknown types are not an error; a known type with
    /// a payload of the wrong shape is.
    pub fn decode(raw: Value) -> Result<Self> {
        let event_type = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::InvalidEvent("missing `type` discriminator".to_string()))?
            .to_string();

        let event = match event_type.as_str() {
            LEG_STATUS_UPDATE => RtcEvent::LegStatusUpdate(payload(&event_type, raw)?),
            APP_KNOCKING => RtcEvent::Knocking(payload(&event_type, raw)?),
            MEMBER_MEDIA => RtcEvent::MemberMedia(payload(&event_type, raw)?),
            AUDIO_SAY_DONE => RtcEvent::AudioSayDone(payload(&event_type, raw)?),
            _ => RtcEvent::Ignored { event_type },
        };

        Ok(event)
    }

    pub fn event_type(&self) -> &str {
        match self {
            RtcEvent::LegStatusUpdate(_) => LEG_STATUS_UPDATE,
            RtcEvent::Knocking(_) => APP_KNOCKING,
            RtcEvent::MemberMedia(_) => MEMBER_MEDIA,
            RtcEvent::AudioSayDone(_) => AUDIO_SAY_DONE,
            RtcEvent::Ignored { event_type } => event_type,
        }
    }
}

fn payload<T: serde::de::DeserializeOwned>(event_type: &str, raw: Value) -> Result<T> {
    serde_json::from_value(raw)
        .map_err(|e| DomainError::InvalidEvent(format!("{}: {}", event_type, e)))
}

/// `leg:status:update`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegStatusUpdate {
    pub conversation_id: ConversationId,
    pub body: LegStatusBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegStatusBody {
    pub leg_id: LegId,
    pub status: String,
}

/// `app:knocking`: a party asks to be admitted before it is a member
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Knocking {
    /// Knocking id
    pub from: String,
    pub body: KnockingBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnockingBody {
    pub channel: Channel,
    pub user: KnockingUser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnockingUser {
    pub id: String,
}

/// Channel descriptor. Endpoints are backend-defined objects and are passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
}

/// `member:media`. Only the audio flag and the channel id are read, and only
/// the flag decides whether the event matters, so both parts stay raw.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberMedia {
    #[serde(default)]
    pub body: MemberMediaBody,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberMediaBody {
    #[serde(default)]
    pub media: Value,
    #[serde(default)]
    pub channel: Value,
}

impl MemberMedia {
    pub fn audio_enabled(&self) -> bool {
        self.body.media.get("audio") == Some(&Value::Bool(true))
    }

    /// Channel id when it is present and a string
    pub fn leg_id(&self) -> Option<LegId> {
        self.body
            .channel
            .get("id")
            .and_then(Value::as_str)
            .map(LegId::new)
    }
}

/// `audio:say:done`. The body is kept raw for whatever follow-up action
/// gets attached to prompt completion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioSayDone {
    #[serde(default)]
    pub body: Value,
}
