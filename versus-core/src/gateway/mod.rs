//! # HTTP Gateway
//!
//! Serves comparisons over HTTP for the presentation layer. Each request is
//! handled with its own [`RequestContext`](crate::context::RequestContext);
//! the gateway keeps no mutable state between requests.

mod server;

pub use server::{GatewayState, SharedState, router as gateway_router, run as run_gateway};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Scored sentence file served as the search backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            corpus: None,
        }
    }
}

impl GatewayConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}
