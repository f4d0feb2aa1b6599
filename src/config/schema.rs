//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config file.
//! Every section has defaults so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

use crate::routing::fallback::DEFAULT_BODY;
use crate::routing::DuplicatePolicy;

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Persistent route store.
    pub store: StoreConfig,

    /// Overlay documents layered on top of the store.
    pub overlays: OverlayConfig,

    /// Response for paths no layer knows.
    pub responder: ResponderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Route store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the store file, created on first run.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "urls.db".to_string(),
        }
    }
}

/// Overlay documents. The JSON overlay wraps the YAML overlay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// YAML document of redirects.
    pub yaml_path: String,

    /// JSON document of redirects.
    pub json_path: String,

    /// Handling of repeated paths inside one document.
    pub duplicates: DuplicatePolicy,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            yaml_path: "urls.yaml".to_string(),
            json_path: "urls.json".to_string(),
            duplicates: DuplicatePolicy::LastWins,
        }
    }
}

/// Default responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub body: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            body: DEFAULT_BODY.to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
