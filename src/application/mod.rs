//! Application layer - Entry points of the orchestration core
//!
//! This layer wires domain services to their two callers:
//! - The event dispatcher, fed one signaling event at a time
//! - The control surface, answering synchronous queries

pub mod context;
pub mod control;
pub mod dispatcher;

pub use context::RtcContext;
pub use control::{Acknowledgement, ControlSurface, ConversationLegsView};
pub use dispatcher::{ErrorSink, EventDispatcher, LogErrorSink};
