//! API interface implementations

pub mod conversations_handler;
pub mod error;
pub mod legs_handler;
pub mod metrics_handler;
pub mod router;
pub mod rtc_handler;
pub mod state;
pub mod system_handler;

pub use error::ApiError;
pub use metrics_handler::init_metrics;
pub use router::build_router;
pub use state::AppState;
