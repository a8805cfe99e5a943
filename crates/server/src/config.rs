use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use remote::{ExtractConfig, ImproveConfig};

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Character cap for `POST /improve` input, enforced before any work
    #[serde(default = "default_improve_max_chars")]
    pub improve_max_chars: usize,

    /// Character cap for `POST /hocr` input, enforced before any work
    #[serde(default = "default_hocr_max_chars")]
    pub hocr_max_chars: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Entity-extraction collaborator
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Language-model collaborator
    #[serde(default)]
    pub improve: ImproveConfig,

    /// System prompt for the language-model rewrite; empty means the
    /// pipeline default
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            improve_max_chars: default_improve_max_chars(),
            hocr_max_chars: default_hocr_max_chars(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            extract: ExtractConfig::default(),
            improve: ImproveConfig::default(),
            system_prompt: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("textveil").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("TEXTVEIL_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.extract.api_url.is_none() {
            tracing::warn!(
                "No extraction endpoint configured; requests will use the local simulation"
            );
        }
        if config.improve.api_url.is_none() || config.improve.api_key.is_none() {
            tracing::warn!("No language-model credentials configured; /improve will report a configuration error");
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_improve_max_chars() -> usize {
    10_000
}

fn default_hocr_max_chars() -> usize {
    50_000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout_secs, 60);
        assert_eq!(cfg.improve_max_chars, 10_000);
        assert_eq!(cfg.hocr_max_chars, 50_000);
        assert!(cfg.enable_cors);
        assert!(cfg.extract.api_url.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
