//! HTTP fetcher for the cluster API
//!
//! Every call is a single authenticated `GET` against
//! `<cluster_host>:<api_port><path>`. There is no retry and no pagination;
//! the caller owns both.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{Cluster, Role, User};
use crate::ratelimit::extract_rate_limit;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use redis_iam_core::Annotations;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

pub const USERS_PATH: &str = "/v1/users";
pub const ROLES_PATH: &str = "/v1/roles";
pub const CLUSTER_PATH: &str = "/v1/cluster";

/// Path of a single role
pub fn role_path(role_uid: &str) -> String {
    format!("{}/{}", ROLES_PATH, role_uid)
}

/// Read-only view of the cluster API used by the catalog builders
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// All users, in API order
    async fn list_users(&self, cancel: &CancellationToken) -> Result<(Vec<User>, Annotations)>;

    /// All roles, in API order
    async fn list_roles(&self, cancel: &CancellationToken) -> Result<(Vec<Role>, Annotations)>;

    /// The cluster singleton, wrapped in a one-element list
    async fn list_clusters(&self, cancel: &CancellationToken) -> Result<(Vec<Cluster>, Annotations)>;

    /// Detail record of one role
    async fn get_role_details(
        &self,
        role_uid: &str,
        cancel: &CancellationToken,
    ) -> Result<(Role, Annotations)>;
}

/// Raw response of a successful request
struct Fetched {
    url: String,
    body: bytes::Bytes,
    annotations: Annotations,
}

impl Fetched {
    fn is_blank(&self) -> bool {
        match std::str::from_utf8(&self.body) {
            Ok(text) => {
                let text = text.trim();
                text.is_empty() || text == "null"
            }
            Err(_) => false,
        }
    }

    fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| ClientError::Decode {
            url: self.url.clone(),
            source,
        })
    }

    /// Decode a collection; a blank body is an empty collection
    fn decode_list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if self.is_blank() {
            return Ok(Vec::new());
        }
        self.decode()
    }
}

/// Redis Enterprise REST client
#[derive(Clone)]
pub struct RedisClient {
    http: reqwest::Client,
    base_url: String,
    authorization: String,
}

impl RedisClient {
    /// Validate `config` and build a client with its own connection pool
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Build a client on top of an existing `reqwest::Client`.
    ///
    /// The config is not validated here.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Self {
        let token = STANDARD.encode(format!("{}:{}", config.username, config.password));

        Self {
            http,
            base_url: config.base_url(),
            authorization: format!("Basic {}", token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, cancel: &CancellationToken) -> Result<Fetched> {
        let url = format!("{}{}", self.base_url, path);
        let parsed = Url::parse(&url).map_err(|e| ClientError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!("GET {}", url);

        let request = self
            .http
            .get(parsed)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.authorization);

        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let annotation = extract_rate_limit(status, response.headers());
            let body = response.bytes().await?;
            Ok::<_, ClientError>((status, annotation, body))
        };

        // Dropping `exchange` aborts the in-flight request.
        let (status, annotation, body) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = exchange => result?,
        };

        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(status_error(status, url, &body));
        }

        Ok(Fetched {
            url,
            body,
            annotations: Annotations::from(annotation),
        })
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<(Vec<T>, Annotations)> {
        let fetched = self.get(path, cancel).await?;
        let items = fetched.decode_list()?;
        Ok((items, fetched.annotations))
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<(T, Annotations)> {
        let fetched = self.get(path, cancel).await?;
        let item = fetched.decode()?;
        Ok((item, fetched.annotations))
    }
}

fn status_error(status: StatusCode, url: String, body: &[u8]) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized {
            status: status.as_u16(),
            url,
        },
        StatusCode::NOT_FOUND => ClientError::NotFound { url },
        _ => ClientError::Status {
            status: status.as_u16(),
            url,
            body: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

fn log_failure(path: &str, err: &ClientError) {
    if err.is_cancelled() {
        debug!("Request for {} cancelled", path);
    } else {
        error!("Error getting resources from {}: {}", path, err);
    }
}

#[async_trait]
impl ClusterApi for RedisClient {
    async fn list_users(&self, cancel: &CancellationToken) -> Result<(Vec<User>, Annotations)> {
        self.fetch_list(USERS_PATH, cancel).await.map_err(|e| {
            log_failure(USERS_PATH, &e);
            e
        })
    }

    async fn list_roles(&self, cancel: &CancellationToken) -> Result<(Vec<Role>, Annotations)> {
        self.fetch_list(ROLES_PATH, cancel).await.map_err(|e| {
            log_failure(ROLES_PATH, &e);
            e
        })
    }

    async fn list_clusters(&self, cancel: &CancellationToken) -> Result<(Vec<Cluster>, Annotations)> {
        let (cluster, annotations) = self
            .fetch_one::<Cluster>(CLUSTER_PATH, cancel)
            .await
            .map_err(|e| {
                log_failure(CLUSTER_PATH, &e);
                e
            })?;

        Ok((vec![cluster], annotations))
    }

    async fn get_role_details(
        &self,
        role_uid: &str,
        cancel: &CancellationToken,
    ) -> Result<(Role, Annotations)> {
        let path = role_path(role_uid);
        self.fetch_one(&path, cancel).await.map_err(|e| {
            log_failure(&path, &e);
            e
        })
    }
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
