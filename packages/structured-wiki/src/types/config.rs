//! Configuration supplied by the surrounding shell.
//!
//! The desktop shell resolves a backend address from a JSON config file and
//! hands it to this crate; nothing here is hardcoded in production. A
//! localhost default exists for development only.
//!
//! API keys are held behind a redacting wrapper so they never leak into
//! logs, debug output, or error messages.

use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use url::Url;

use crate::error::ConfigError;

/// Development-only backend address, used when no config is provided.
pub const DEV_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Default provider identifier for [`Settings::tool`].
pub const DEFAULT_TOOL: &str = "default-provider";

/// Shape of the shell's `config.json`.
///
/// `port` is required; `backend_base_url` overrides the host-and-port
/// fallback entirely when present.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,

    #[serde(default, rename = "backendBaseUrl")]
    pub backend_base_url: Option<String>,
}

impl AppConfig {
    /// Parse a config from its JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Resolve the backend base address: the explicit override when set,
    /// otherwise `http://127.0.0.1:{port}`.
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        let raw = match &self.backend_base_url {
            Some(url) => url.clone(),
            None => format!("http://127.0.0.1:{}", self.port),
        };
        Ok(Url::parse(&raw)?)
    }
}

/// An API key that won't be logged or displayed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use in an outbound request.
    ///
    /// Only call this at the point the key is actually sent.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Explicit settings passed into the orchestration layer.
///
/// Replaces the original's implicit global context: the viewer receives
/// this value, there is no process-wide state.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Provider identifier for downstream tooling.
    pub tool: String,

    pub api_key: ApiKey,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            api_key: ApiKey::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider identifier.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = key.into();
        self
    }
}
