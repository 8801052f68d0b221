//! Conversation service port
//!
//! The remote conversation/telephony control API is reached through a single
//! request primitive, [`ConversationService::request`]. [`ConversationApi`]
//! builds the concrete endpoint calls on top of it.

pub mod api;
pub mod payload;

pub use api::{ConversationApi, Endpoints};
pub use payload::{MemberChannel, MemberJoin, MemberMediaCapability, MemberUser, TalkAction};

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{url, method, data}` request against the conversation service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub data: Option<Value>,
}

impl ServiceRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            data: None,
        }
    }

    pub fn post(url: impl Into<String>, data: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            data: Some(data),
        }
    }

    pub fn put(url: impl Into<String>, data: Value) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            query: Vec::new(),
            data: Some(data),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The service answered with a non-2xx status
    #[error("Conversation service responded with HTTP {status}")]
    Http { status: u16, body: Value },

    #[error("Conversation service transport error: {0}")]
    Transport(String),

    #[error("Conversation service request timed out after {0:?}")]
    Timeout(Duration),
}

/// Authenticated access to the conversation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Issue one request and return the parsed response body
    async fn request(&self, request: ServiceRequest) -> Result<Value, ServiceError>;
}
