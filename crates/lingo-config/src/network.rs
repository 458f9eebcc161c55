use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Base URL of the translation backend.
    pub base_url: String,
    /// Interval between backend reachability probes.
    pub connection_interval_ms: u64,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let base_url =
            env::var("LINGO_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

        let connection_interval_ms = env::var("LINGO_CONNECTION_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15000);

        Self {
            base_url,
            connection_interval_ms,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}
