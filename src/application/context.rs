//! Collaborators shared by every entry point

use crate::domain::call_control::{CallControl, CallFlowSettings};
use crate::domain::conversation::{ConversationApi, ConversationService, Endpoints};
use crate::domain::correlation::{CorrelationStore, LegCorrelator};
use std::sync::Arc;

/// Correlation store, conversation service and call flow parameters.
/// Handlers are built from it; it holds no state of its own.
#[derive(Clone)]
pub struct RtcContext {
    pub store: Arc<dyn CorrelationStore>,
    pub service: Arc<dyn ConversationService>,
    pub endpoints: Endpoints,
    pub call_flow: CallFlowSettings,
}

impl RtcContext {
    pub fn new(
        store: Arc<dyn CorrelationStore>,
        service: Arc<dyn ConversationService>,
        endpoints: Endpoints,
        call_flow: CallFlowSettings,
    ) -> Self {
        Self {
            store,
            service,
            endpoints,
            call_flow,
        }
    }

    pub fn correlator(&self) -> LegCorrelator {
        LegCorrelator::new(self.store.clone())
    }

    pub fn conversation_api(&self) -> ConversationApi {
        ConversationApi::new(self.service.clone(), self.endpoints.clone())
    }

    pub fn call_control(&self) -> CallControl {
        CallControl::new(self.conversation_api(), self.call_flow.clone())
    }
}
