//! HTTP Server Configuration
//!
//! Bind address, CORS, the delete shared secret, error signalling and the
//! optional snapshot file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::rest_api::ErrorMode;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Shared secret required by the delete endpoint (default: "1234")
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Status code policy for error bodies
    #[serde(default)]
    pub error_mode: ErrorMode,

    /// JSON snapshot file. Unset keeps cafes in memory only.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_key() -> String {
    "1234".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            api_key: default_api_key(),
            error_mode: ErrorMode::default(),
            data_file: None,
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
