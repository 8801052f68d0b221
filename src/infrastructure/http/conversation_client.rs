//! Conversation service client over HTTP

use crate::domain::conversation::{ConversationService, Method, ServiceError, ServiceRequest};
use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Authenticated client for the conversation service. Every request carries
/// the configured bearer token and is bounded by the client timeout.
pub struct HttpConversationClient {
    client: Client,
    token: Option<String>,
    timeout: Duration,
}

impl HttpConversationClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout(self.timeout)
        } else if e.is_connect() {
            ServiceError::Transport(format!("Connection failed: {}", e))
        } else {
            ServiceError::Transport(format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl ConversationService for HttpConversationClient {
    async fn request(&self, request: ServiceRequest) -> Result<Value, ServiceError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(data) = &request.data {
            debug!(method = %request.method, url = %request.url, body = %data, "Conversation service request body");
            builder = builder.json(data);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let err = self.classify(e);
            warn!(method = %request.method, url = %request.url, error = %err, "Conversation service request failed");
            err
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        info!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Conversation service request completed"
        );
        counter!(
            "conversation_requests_total",
            "method" => request.method.as_str(),
            "status" => status.as_u16().to_string()
        )
        .increment(1);

        if !status.is_success() {
            let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
