//! Config schema types (server, whatsapp session, caller-side client).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default gateway port.
pub const DEFAULT_PORT: u16 = 3001;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub whatsapp: WhatsAppConfig,
    pub client: ClientConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: DEFAULT_PORT,
        }
    }
}

/// WhatsApp session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    /// Directory holding the persisted session. Defaults to
    /// `~/.wabridge/whatsapp`.
    pub session_dir: Option<PathBuf>,
    /// Device name shown under "Linked devices" on the phone.
    pub device_name: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            session_dir: None,
            device_name: "wabridge".into(),
        }
    }
}

impl WhatsAppConfig {
    pub fn resolved_session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| crate::loader::data_dir().join("whatsapp"))
    }
}

/// Settings for the CLI commands that talk to a running gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the gateway.
    pub bridge_url: String,
    /// Chats `send` delivers to when no `--to` is given.
    pub default_targets: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bridge_url: format!("http://localhost:{DEFAULT_PORT}"),
            default_targets: Vec::new(),
        }
    }
}

impl BridgeConfig {
    /// Apply `WABRIDGE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides resolved through `lookup`. Empty values are ignored.
    pub fn apply_overrides_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get("WABRIDGE_SESSION_DIR") {
            self.whatsapp.session_dir = Some(PathBuf::from(dir));
        }
        if let Some(port) = get("WABRIDGE_PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!(value = %port, error = %e, "ignoring invalid WABRIDGE_PORT"),
            }
        }
        if let Some(url) = get("WABRIDGE_URL") {
            self.client.bridge_url = url;
        }
        if let Some(targets) = get("WABRIDGE_TARGETS") {
            self.client.default_targets = split_list(&targets);
        }
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
