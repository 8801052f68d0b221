//! Health and greeting endpoints

use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// Health check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn hello() -> Json<Value> {
    info!("Hello Request HTTP");
    Json(json!({ "text": "Hello Request!" }))
}
