//! Viewer configuration
//!
//! Plain values handed to the server at startup. Nothing in here changes
//! after the router has been built.

use serde::{Deserialize, Serialize};

use crate::schema::KnownDatabase;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8082)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base tracing level used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Databases offered on the start page
    #[serde(default)]
    pub databases: Vec<KnownDatabase>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            databases: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
