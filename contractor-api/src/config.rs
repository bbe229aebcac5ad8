use config::{Config, ConfigError, File};
use contractor_sync::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub mock: Option<MockConfig>,
    pub refresh: Option<RefreshConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig::default()),
            mock: Some(MockConfig::default()),
            refresh: Some(RefreshConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Simulated network conditions for the in-memory store
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MockConfig {
    pub latency_ms: u64,
    pub failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            failure_rate: 0.0,
        }
    }
}

impl MockConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Read by dashboard clients; the server itself never ticks
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefreshConfig {
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[mock]
# Simulated round-trip time for every call to the in-memory store
latency_ms = 300
# Share of calls that fail with a transport error, 0.0 to 1.0
failure_rate = 0.0

[refresh]
# Live update interval used by dashboard clients
interval_secs = 5

[client]
# Request timeout for dashboard clients started with --server
timeout_secs = 10
"#;

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        Self::load_from(&paths::config_path())
    }

    /// Loads `config_path`, writing the default file first when it does not exist
    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf), ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path.to_path_buf()))
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn mock(&self) -> MockConfig {
        self.mock.clone().unwrap_or_default()
    }

    /// Serialized form, used to print the effective configuration
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_is_written_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let (config, loaded_from) = ApiConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(loaded_from, path);
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.mock().latency(), Duration::from_millis(300));
        assert_eq!(config.refresh.unwrap().interval_secs, 5);
    }

    #[test]
    fn test_default_file_carries_client_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        ApiConfig::load_from(&path).unwrap();

        let raw = Config::builder()
            .add_source(File::from(path))
            .build()
            .unwrap();
        assert_eq!(raw.get_int("client.timeout_secs").unwrap(), 10);
    }

    #[test]
    fn test_existing_file_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9090

[mock]
latency_ms = 0
failure_rate = 0.25
"#,
        )
        .unwrap();

        let (config, _) = ApiConfig::load_from(&path).unwrap();

        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(config.server().port, 9090);
        assert_eq!(config.mock().failure_rate, 0.25);
        assert!(config.cors.is_none());
        assert!(config.refresh.is_none());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let toml = ApiConfig::default().to_toml().unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("latency_ms = 300"));
    }
}
