//! Shared test fixtures: a fake conversation backend and router setup

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use legwork::application::RtcContext;
use legwork::domain::call_control::CallFlowSettings;
use legwork::domain::conversation::{
    ConversationService, Endpoints, Method, ServiceError, ServiceRequest,
};
use legwork::infrastructure::storage::InMemoryCorrelationStore;
use legwork::interface::api::{build_router, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For `oneshot`

pub const BASE_URL: &str = "https://api.test";
pub const PROVISIONING_URL: &str = "http://provision.test";

/// In-memory stand-in for the conversation service. Records every request.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<ServiceRequest>>,
    pub conversations: Mutex<Vec<Value>>,
    /// Fail provisioning with a transport error
    pub provisioning_down: Mutex<bool>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<ServiceRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, method: Method, suffix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && c.url.ends_with(suffix))
            .count()
    }

    pub fn add_conversation(&self, id: &str, name: &str) {
        self.conversations
            .lock()
            .unwrap()
            .push(json!({ "id": id, "name": name, "members": [] }));
    }

    fn route(&self, req: &ServiceRequest) -> Result<Value, ServiceError> {
        let conversations_url = format!("{}/v0.3/conversations", BASE_URL);

        if let Some(name) = req
            .url
            .strip_prefix(&format!("{}/conversations/", PROVISIONING_URL))
        {
            if *self.provisioning_down.lock().unwrap() {
                return Err(ServiceError::Transport("connection refused".to_string()));
            }
            return Ok(json!({ "id": format!("CON-{}", name), "name": name }));
        }

        if req.url == conversations_url {
            let mut conversations = self.conversations.lock().unwrap();
            return match req.method {
                Method::Get => {
                    let name = req
                        .query
                        .iter()
                        .find(|(k, _)| k == "name")
                        .map(|(_, v)| v.clone())
                        .unwrap_or_default();
                    let matches: Vec<Value> = conversations
                        .iter()
                        .filter(|c| c["name"] == name.as_str())
                        .map(|c| json!({ "id": c["id"], "name": c["name"] }))
                        .collect();
                    Ok(json!({ "_embedded": { "conversations": matches } }))
                }
                _ => {
                    let name = req.data.as_ref().map(|d| d["name"].clone()).unwrap_or(Value::Null);
                    let created = json!({
                        "id": format!("CON-{}", conversations.len() + 1),
                        "name": name,
                        "members": []
                    });
                    conversations.push(created.clone());
                    Ok(created)
                }
            };
        }

        if let Some(id) = req.url.strip_prefix(&format!("{}/", conversations_url)) {
            if id.ends_with("/members") {
                return Ok(json!({ "id": "MEM-1", "state": "JOINED" }));
            }
            return self
                .conversations
                .lock()
                .unwrap()
                .iter()
                .find(|c| c["id"] == id)
                .cloned()
                .ok_or(ServiceError::Http {
                    status: 404,
                    body: json!({ "type": "conversation:error:not-found" }),
                });
        }

        if req.url.ends_with("/talk") {
            return Ok(json!({ "id": "TALK-1" }));
        }

        if let Some(leg) = req.url.strip_prefix(&format!("{}/v0.1/legs/", BASE_URL)) {
            return match leg {
                l if l.starts_with("gone") => Err(ServiceError::Http {
                    status: 404,
                    body: json!({ "type": "leg:error:not-found", "title": "Not Found" }),
                }),
                l if l.starts_with("unreachable") => {
                    Err(ServiceError::Transport("connection reset".to_string()))
                }
                _ => Ok(Value::Null),
            };
        }

        Err(ServiceError::Http {
            status: 404,
            body: json!({ "unrouted": req.url }),
        })
    }
}

#[async_trait]
impl ConversationService for FakeBackend {
    async fn request(&self, request: ServiceRequest) -> Result<Value, ServiceError> {
        self.calls.lock().unwrap().push(request.clone());
        self.route(&request)
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<FakeBackend>,
    pub store: Arc<InMemoryCorrelationStore>,
}

pub fn setup() -> TestApp {
    let backend = Arc::new(FakeBackend::default());
    let store = Arc::new(InMemoryCorrelationStore::new());
    let context = RtcContext::new(
        store.clone(),
        backend.clone(),
        Endpoints::new(BASE_URL, PROVISIONING_URL),
        CallFlowSettings::default(),
    );
    let prometheus_handle = PrometheusBuilder::new().build_recorder().handle();
    let router = build_router(AppState::new(&context), prometheus_handle);

    TestApp {
        router,
        backend,
        store,
    }
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

/// POST a raw body to the event ingress, with an optional content type
pub async fn post_raw_event(
    router: &Router,
    content_type: Option<&str>,
    body: &'static str,
) -> StatusCode {
    let mut request = Request::builder().method("POST").uri("/rtc/events");
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let response = router
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    response.status()
}

pub async fn post_event(router: &Router, event: Value) -> StatusCode {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/rtc/events")
                .header("content-type", "application/json")
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn leg_status(conversation_id: &str, leg_id: &str, status: &str) -> Value {
    json!({
        "type": "leg:status:update",
        "conversation_id": conversation_id,
        "body": { "leg_id": leg_id, "status": status }
    })
}
