//! Shared handler state

use crate::application::{ControlSurface, EventDispatcher, RtcContext};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<EventDispatcher>,
    pub control: Arc<ControlSurface>,
}

impl AppState {
    pub fn new(context: &RtcContext) -> Self {
        Self {
            dispatcher: Arc::new(EventDispatcher::new(context)),
            control: Arc::new(ControlSurface::new(context)),
        }
    }
}
