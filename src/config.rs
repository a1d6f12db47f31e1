//! Tap configuration
//!
//! The tap is configured with a single JSON document (file or inline
//! string). `api_key` and `organization_ids` mirror the source API's
//! requirements; `flattening` and `batch_config` are accepted for
//! downstream loaders and never interpreted here.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default Tally API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.tally.so";

// ============================================================================
// Tap Config
// ============================================================================

/// Complete tap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Tally API key (secret)
    #[serde(default)]
    pub api_key: String,

    /// Organization IDs to extract from.
    ///
    /// Required, but may be empty: an empty list resolves the caller's
    /// own organization via `GET /users/me`.
    #[serde(default)]
    pub organization_ids: Vec<String>,

    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// HTTP client tuning
    #[serde(default)]
    pub http: HttpSettings,

    /// Flattening options, passed through to downstream consumers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flattening: Option<Value>,

    /// Batch output options, passed through to downstream consumers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_config: Option<Value>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            organization_ids: Vec::new(),
            base_url: default_base_url(),
            user_agent: None,
            http: HttpSettings::default(),
            flattening: None,
            batch_config: None,
        }
    }
}

impl TapConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_json(&content)
    }

    /// Load configuration from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate required fields and value shapes
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        Url::parse(&self.base_url)?;

        if self.organization_ids.iter().any(String::is_empty) {
            return Err(Error::InvalidConfigValue {
                field: "organization_ids".to_string(),
                message: "entries must be non-empty strings".to_string(),
            });
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Rate limit (requests per second); None disables rate limiting
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffSettings,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            rate_limit_rps: None,
            backoff: BackoffSettings::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffSettings {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl BackoffSettings {
    /// Initial delay as a Duration
    pub fn initial(&self) -> Duration {
        Duration::from_millis(self.initial_ms)
    }

    /// Maximum delay as a Duration
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Config Schema
// ============================================================================

/// JSON schema describing the accepted configuration, emitted by `spec`
pub fn config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "api_key": {
                "type": "string",
                "title": "API Key",
                "description": "Your Tally API key",
                "secret": true
            },
            "organization_ids": {
                "type": "array",
                "items": { "type": "string" },
                "title": "Organization IDs",
                "description": "Your Tally organization IDs",
                "default": []
            },
            "base_url": {
                "type": "string",
                "format": "uri",
                "default": DEFAULT_BASE_URL
            },
            "user_agent": { "type": "string" },
            "flattening": { "type": "object" },
            "batch_config": { "type": "object" }
        },
        "required": ["api_key", "organization_ids"]
    })
}
