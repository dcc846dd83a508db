//! Configuration Module
//!
//! Handles loading and validating proxy configuration from environment
//! variables or a YAML file.

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Proxy configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backing Redis address, `host:port` or a `redis://` URL
    pub backend_addr: String,
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Maximum entry age in seconds
    pub ttl_seconds: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Upper bound for one backing store call in milliseconds
    pub backend_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from the YAML file named by `CONFIG_FILE` if set,
    /// otherwise from environment variables. The result is validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BACKEND_ADDR` - Backing Redis address (default: 127.0.0.1:6379)
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BACKEND_TIMEOUT_MS` - Backing store call timeout (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_addr: env::var("BACKEND_ADDR").unwrap_or(defaults.backend_addr),
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            ttl_seconds: parse_var("CACHE_TTL").unwrap_or(defaults.ttl_seconds),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            backend_timeout_ms: parse_var("BACKEND_TIMEOUT_MS")
                .unwrap_or(defaults.backend_timeout_ms),
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// ```yaml
    /// redis:
    ///   url: localhost:6379
    ///   timeout_ms: 2000   # optional
    /// cache:
    ///   capacity: 1000
    ///   expiry: 300
    /// service:
    ///   port: 3000
    /// ```
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_yaml::from_str(contents)?;
        let defaults = Self::default();
        Ok(Self {
            backend_addr: file.redis.url,
            capacity: file.cache.capacity,
            ttl_seconds: file.cache.expiry,
            server_port: file.service.port,
            backend_timeout_ms: file
                .redis
                .timeout_ms
                .unwrap_or(defaults.backend_timeout_ms),
        })
    }

    /// Checks the values the cache and client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("backing store address is empty".to_string()));
        }
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("cache capacity must be positive".to_string()));
        }
        if self.backend_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "backing store timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_addr: "127.0.0.1:6379".to_string(),
            capacity: 1000,
            ttl_seconds: 300,
            server_port: 3000,
            backend_timeout_ms: 2000,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

// == YAML File Layout ==
#[derive(Debug, Deserialize)]
struct FileConfig {
    redis: RedisSection,
    cache: CacheSection,
    service: ServiceSection,
}

#[derive(Debug, Deserialize)]
struct RedisSection {
    url: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CacheSection {
    capacity: usize,
    expiry: u64,
}

#[derive(Debug, Deserialize)]
struct ServiceSection {
    #[serde(deserialize_with = "deserialize_port")]
    port: u16,
}

/// Accepts `3000`, `"3000"` and `":3000"`.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim_start_matches(':')
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
redis:
  url: localhost:6379
cache:
  capacity: 2
  expiry: 5
service:
  port: ":8080"
"#;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend_addr, "127.0.0.1:6379");
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.backend_timeout_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("BACKEND_ADDR");
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("BACKEND_TIMEOUT_MS");

        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_config_from_yaml() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.backend_addr, "localhost:6379");
        assert_eq!(config.capacity, 2);
        assert_eq!(config.ttl_seconds, 5);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.backend_timeout_ms, 2000);
    }

    #[test]
    fn test_config_from_yaml_numeric_port_and_timeout() {
        let yaml = SAMPLE
            .replace("port: \":8080\"", "port: 9000")
            .replace("url: localhost:6379", "url: localhost:6379\n  timeout_ms: 250");

        let config = Config::from_yaml_str(&yaml).unwrap();

        assert_eq!(config.server_port, 9000);
        assert_eq!(config.backend_timeout_ms, 250);
    }

    #[test]
    fn test_config_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.capacity, 2);
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::from_yaml_file("/nonexistent/conf.yaml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_missing_section() {
        let result = Config::from_yaml_str("redis:\n  url: localhost:6379\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_address() {
        let config = Config {
            backend_addr: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_zero_ttl() {
        let config = Config {
            ttl_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
