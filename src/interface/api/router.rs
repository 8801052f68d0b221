//! API Router configuration

use super::conversations_handler::get_or_create_conversation;
use super::legs_handler::{hangup_leg, list_conversation_legs};
use super::metrics_handler::metrics_handler;
use super::rtc_handler::rtc_event;
use super::state::AppState;
use super::system_handler::{health_check, hello};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let system_routes = Router::new()
        .route("/health", get(health_check))
        .route("/hello", get(hello));

    // Signaling event ingress
    let rtc_routes = Router::new().route("/rtc/events", post(rtc_event));

    let leg_routes = Router::new()
        .route("/legs/:legid/hangup", get(hangup_leg))
        .route("/convs/:cid/legs", get(list_conversation_legs));

    let conversation_routes =
        Router::new().route("/conversations/:name", get(get_or_create_conversation));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(system_routes)
        .merge(rtc_routes)
        .merge(leg_routes)
        .merge(conversation_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
