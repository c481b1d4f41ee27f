//! Driver configuration loading and validation

use anyhow::{Context, Result};
use redis_iam_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Complete driver configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub redis: RedisSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Cluster connection settings
#[derive(Clone, Deserialize, Serialize)]
pub struct RedisSection {
    #[serde(default)]
    pub cluster_host: String,
    #[serde(default)]
    pub api_port: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Where the discovered graph is written
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputSection {
    /// File path; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cluster_host: Option<String>,
    pub api_port: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

fn default_request_timeout() -> u64 { 30 }

impl Default for RedisSection {
    fn default() -> Self {
        Self {
            cluster_host: String::new(),
            api_port: String::new(),
            username: String::new(),
            password: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read configuration file {}", path.as_ref().display())
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration file")
    }

    /// Load `path` if given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Replace file values with any value given on the command line
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.cluster_host {
            self.redis.cluster_host = host;
        }
        if let Some(port) = overrides.api_port {
            self.redis.api_port = port;
        }
        if let Some(username) = overrides.username {
            self.redis.username = username;
        }
        if let Some(password) = overrides.password {
            self.redis.password = password;
        }
        if let Some(output) = overrides.output {
            self.output.path = Some(output);
        }
        if overrides.pretty {
            self.output.pretty = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.client_config()
            .validate()
            .context("Invalid [redis] configuration")?;

        if let Some(path) = &self.output.path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Output path must not be empty");
            }
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(
            self.redis.cluster_host.clone(),
            self.redis.api_port.clone(),
            self.redis.username.clone(),
            self.redis.password.clone(),
        );
        config.request_timeout_secs = self.redis.request_timeout_secs;
        config
    }
}

impl fmt::Debug for RedisSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSection")
            .field("cluster_host", &self.cluster_host)
            .field("api_port", &self.api_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
        [redis]
        cluster_host = "https://redis.example.com"
        api_port = "9443"
        username = "admin@example.com"
        password = "secret"

        [output]
        path = "graph.json"
        pretty = true
    "#;

    #[test]
    fn test_parse_full() {
        let config = NodeConfig::parse(FULL).unwrap();
        assert_eq!(config.redis.cluster_host, "https://redis.example.com");
        assert_eq!(config.redis.request_timeout_secs, 30);
        assert_eq!(config.output.path, Some(PathBuf::from("graph.json")));
        assert!(config.output.pretty);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = NodeConfig::load(file.path()).unwrap();
        assert_eq!(config.redis.api_port, "9443");
    }

    #[test]
    fn test_missing_file() {
        let err = NodeConfig::load("/nonexistent/redis-iam.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(NodeConfig::parse("[redis\ncluster_host = 1").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = NodeConfig::parse(FULL).unwrap();
        config.apply(Overrides {
            cluster_host: Some("http://127.0.0.1".to_string()),
            api_port: Some("8443".to_string()),
            password: Some("other".to_string()),
            ..Default::default()
        });

        assert_eq!(config.redis.cluster_host, "http://127.0.0.1");
        assert_eq!(config.redis.api_port, "8443");
        assert_eq!(config.redis.username, "admin@example.com");
        assert_eq!(config.redis.password, "other");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_defaults_fail_validation() {
        let config = NodeConfig::load_or_default(None).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flags_only() {
        let mut config = NodeConfig::default();
        config.apply(Overrides {
            cluster_host: Some("https://redis.example.com".to_string()),
            api_port: Some("9443".to_string()),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            output: Some(PathBuf::from("out.json")),
            pretty: false,
        });

        config.validate().unwrap();
        assert_eq!(config.client_config().base_url(), "https://redis.example.com:9443");
        assert_eq!(config.output.path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_output_only_file_keeps_timeout_default() {
        let config = NodeConfig::parse("[output]\npretty = true").unwrap();
        assert_eq!(config.redis.request_timeout_secs, 30);
        assert!(config.output.pretty);

        let config = NodeConfig::load_or_default(None).unwrap();
        assert_eq!(config.redis.request_timeout_secs, 30);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = NodeConfig::parse(FULL).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
