//! Signaling event dispatcher
//!
//! Events are fire-and-forget: the emitter never sees an outcome. Whatever a
//! handler fails with is handed to an [`ErrorSink`] together with the event
//! type and then dropped. Nothing is retried.
//!
//! Metric series are labelled with the handled event types only. Every other
//! type counts as `ignored`, and anything that fails to decode as `invalid`.

use super::context::RtcContext;
use crate::domain::call_control::CallControl;
use crate::domain::correlation::LegCorrelator;
use crate::domain::event::{
    RtcEvent, APP_KNOCKING, AUDIO_SAY_DONE, LEG_STATUS_UPDATE, MEMBER_MEDIA,
};
use crate::domain::shared::{DomainError, EventMetadata, Result};
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info_span, Instrument};

const IGNORED_LABEL: &str = "ignored";
const INVALID_LABEL: &str = "invalid";

fn metric_label(event: &RtcEvent) -> &'static str {
    match event {
        RtcEvent::LegStatusUpdate(_) => LEG_STATUS_UPDATE,
        RtcEvent::Knocking(_) => APP_KNOCKING,
        RtcEvent::MemberMedia(_) => MEMBER_MEDIA,
        RtcEvent::AudioSayDone(_) => AUDIO_SAY_DONE,
        RtcEvent::Ignored { .. } => IGNORED_LABEL,
    }
}

/// Destination of event handling failures
pub trait ErrorSink: Send + Sync {
    fn report(&self, event_type: &str, error: &DomainError);
}

/// Logs the failure and drops it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, event_type: &str, error: &DomainError) {
        error!(event_type, error = %error, "Error on rtc event");
    }
}

pub struct EventDispatcher {
    correlator: LegCorrelator,
    call_control: CallControl,
    errors: Arc<dyn ErrorSink>,
}

impl EventDispatcher {
    pub fn new(context: &RtcContext) -> Self {
        Self {
            correlator: context.correlator(),
            call_control: context.call_control(),
            errors: Arc::new(LogErrorSink),
        }
    }

    pub fn with_error_sink(mut self, errors: Arc<dyn ErrorSink>) -> Self {
        self.errors = errors;
        self
    }

    /// Parse and handle one request body. A body that is not JSON is
    /// reported under `<unparseable>`.
    pub async fn dispatch_bytes(&self, body: &[u8]) {
        match serde_json::from_slice(body) {
            Ok(raw) => self.dispatch_raw(raw).await,
            Err(e) => self.fail(
                INVALID_LABEL,
                "<unparseable>",
                DomainError::InvalidEvent(format!("body is not JSON: {}", e)),
            ),
        }
    }

    /// Decode and handle one raw event
    pub async fn dispatch_raw(&self, raw: Value) {
        let event_type = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<untyped>")
            .to_string();
        let meta = EventMetadata::new(event_type.clone());
        let span = info_span!(
            "rtc_event",
            event_id = %meta.event_id,
            event_type = %meta.event_type
        );

        async {
            match RtcEvent::decode(raw) {
                Ok(event) => self.dispatch(event).await,
                Err(e) => self.fail(INVALID_LABEL, &event_type, e),
            }
        }
        .instrument(span)
        .await
    }

    /// Handle one decoded event
    pub async fn dispatch(&self, event: RtcEvent) {
        let label = metric_label(&event);
        counter!("rtc_events_total", "type" => label).increment(1);

        if let Err(e) = self.handle(&event).await {
            self.fail(label, event.event_type(), e);
        }
    }

    async fn handle(&self, event: &RtcEvent) -> Result<()> {
        match event {
            RtcEvent::LegStatusUpdate(update) => {
                let legs = self
                    .correlator
                    .record_leg_status(&update.body.leg_id, &update.conversation_id, &update.body.status)
                    .await?;
                debug!(
                    "Leg {} is {} in conversation {} ({} legs known)",
                    update.body.leg_id,
                    update.body.status,
                    update.conversation_id,
                    legs.len()
                );
            }
            RtcEvent::Knocking(knock) => {
                self.call_control.join_knocker(knock).await?;
            }
            RtcEvent::MemberMedia(media) if media.audio_enabled() => {
                let leg_id = media.leg_id().ok_or_else(|| {
                    DomainError::InvalidEvent("member:media without channel id".to_string())
                })?;
                self.call_control.start_prompt(&leg_id).await?;
            }
            RtcEvent::MemberMedia(_) => {
                debug!("Member media changed without audio, nothing to do");
            }
            RtcEvent::AudioSayDone(done) => {
                self.call_control.on_prompt_done(done).await?;
            }
            RtcEvent::Ignored { event_type } => {
                debug!("Ignoring event {}", event_type);
            }
        }
        Ok(())
    }

    fn fail(&self, label: &'static str, event_type: &str, error: DomainError) {
        counter!("rtc_event_failures_total", "type" => label).increment(1);
        self.errors.report(event_type, &error);
    }
}
