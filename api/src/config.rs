//! API server configuration

use serde::{Deserialize, Serialize};

/// Server configuration, read from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Allow any origin, method and header
    pub cors_permissive: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".into(),
            log_level: "info".into(),
            cors_permissive: true,
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Replace the port of `bind_addr`. Values that are not a port are ignored.
    pub fn apply_port(&mut self, port: &str) {
        let Ok(port) = port.trim().parse::<u16>() else {
            tracing::warn!(port, "ignoring invalid PORT");
            return;
        };
        let host = self
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.bind_addr = format!("{host}:{port}");
    }
}
