//! Configuration management
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LEGWORK__<SECTION>__<KEY>` environment variables.

use crate::domain::call_control::CallFlowSettings;
use crate::domain::conversation::{Endpoints, TalkAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "LEGWORK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub conversation_service: ConversationServiceConfig,
    pub storage: StorageConfig,
    pub call_flow: CallFlowConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationServiceConfig {
    pub base_url: String,
    pub provisioning_url: String,
    /// Bearer token sent with every request; empty sends none
    pub token: String,
    pub timeout_ms: u64,
}

impl fmt::Debug for ConversationServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ConversationServiceConfig")
            .field("base_url", &self.base_url)
            .field("provisioning_url", &self.provisioning_url)
            .field("token", &token)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub redis_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFlowConfig {
    pub conversation_name: String,
    pub prompt_text: String,
    pub prompt_voice: String,
    pub prompt_loop: u32,
    pub prompt_level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        let call_flow = CallFlowSettings::default();
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5001,
            },
            conversation_service: ConversationServiceConfig {
                base_url: "https://api.nexmo.com".to_string(),
                provisioning_url: "http://localhost:5001".to_string(),
                token: String::new(),
                timeout_ms: 10_000,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                redis_url: "redis://127.0.0.1/".to_string(),
                timeout_ms: 2_000,
            },
            call_flow: CallFlowConfig {
                conversation_name: call_flow.conversation_name,
                prompt_text: call_flow.prompt.text,
                prompt_voice: call_flow.prompt.voice_name,
                prompt_loop: call_flow.prompt.loops,
                prompt_level: call_flow.prompt.level,
            },
            log: LogConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration, reading `path` when given
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            &self.conversation_service.base_url,
            &self.conversation_service.provisioning_url,
        )
    }

    pub fn call_flow_settings(&self) -> CallFlowSettings {
        CallFlowSettings {
            conversation_name: self.call_flow.conversation_name.clone(),
            prompt: TalkAction {
                loops: self.call_flow.prompt_loop,
                text: self.call_flow.prompt_text.clone(),
                level: self.call_flow.prompt_level,
                voice_name: self.call_flow.prompt_voice.clone(),
            },
        }
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_millis(self.conversation_service.timeout_ms)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage.timeout_ms)
    }
}
