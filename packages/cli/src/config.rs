use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "swatch.config.json";

/// Swatch configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON catalog of templates, relative to the config directory
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// IP literal or host name to bind
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Accept `x-swatch-*` access headers from a fronting auth proxy
    #[serde(default)]
    pub trust_proxy_headers: bool,

    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_catalog() -> String {
    "templates.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the template catalog
    pub fn get_catalog_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.catalog)
    }

    /// Resolve `host:port` to the address to bind. Host names are looked up.
    pub async fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))?
            .next()
            .ok_or_else(|| anyhow::anyhow!("{} did not resolve to an address", self.host))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            host: default_host(),
            port: default_port(),
            trust_proxy_headers: false,
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "catalog": "data/catalog.json",
            "port": 8080,
            "trustProxyHeaders": true,
            "logFilter": "swatch_workspace=debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.catalog, "data/catalog.json");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.trust_proxy_headers);
        assert_eq!(config.log_filter, "swatch_workspace=debug");
    }

    #[tokio::test]
    async fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog, "templates.json");
        assert_eq!(config.port, 3030);
        assert!(!config.trust_proxy_headers);
        assert_eq!(config.socket_addr().await.unwrap().to_string(), "127.0.0.1:3030");
    }

    #[tokio::test]
    async fn test_host_name_resolves() {
        let config = Config {
            host: "localhost".to_string(),
            ..Config::default()
        };

        let addr = config.socket_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3030);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "host": "0.0.0.0" }"#).unwrap();

        let cwd = dir.path().to_str().unwrap();
        let config = Config::load(cwd).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.get_catalog_path(cwd), dir.path().join("templates.json"));
    }

    #[tokio::test]
    async fn test_invalid_host() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(config.socket_addr().await.is_err());
    }
}
