//! Client configuration and validation

use crate::error::{ClientError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Connection settings for the cluster API
#[derive(Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Scheme and host of the cluster, e.g. `https://cluster.example.com`
    pub cluster_host: String,

    /// REST API port (9443 on a default install)
    pub api_port: String,

    pub username: String,

    pub password: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 { 30 }

impl ClientConfig {
    pub fn new(
        cluster_host: impl Into<String>,
        api_port: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            cluster_host: cluster_host.into(),
            api_port: api_port.into(),
            username: username.into(),
            password: password.into(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Check the settings before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.cluster_host.trim().is_empty() {
            return Err(ClientError::configuration("cluster host is required"));
        }

        let url = Url::parse(self.cluster_host.trim()).map_err(|e| {
            ClientError::configuration(format!("invalid cluster host {:?}: {}", self.cluster_host, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::configuration(format!(
                "cluster host must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ClientError::configuration("cluster host has no host name"));
        }

        match self.api_port.trim().parse::<u16>() {
            Ok(0) | Err(_) => {
                return Err(ClientError::configuration(format!(
                    "api port must be a number between 1 and 65535, got {:?}",
                    self.api_port
                )));
            }
            Ok(_) => {}
        }

        if self.username.is_empty() {
            return Err(ClientError::configuration("username is required"));
        }
        if self.password.is_empty() {
            return Err(ClientError::configuration("password is required"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ClientError::configuration("request timeout must be positive"));
        }

        Ok(())
    }

    /// `<cluster_host>:<api_port>`, the prefix of every request URL
    pub fn base_url(&self) -> String {
        format!(
            "{}:{}",
            self.cluster_host.trim().trim_end_matches('/'),
            self.api_port.trim()
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("cluster_host", &self.cluster_host)
            .field("api_port", &self.api_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
