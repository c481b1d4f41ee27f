//! # Redis IAM Client
//!
//! Read-only client for the Redis Enterprise cluster REST API.
//!
//! ## Endpoints
//!
//! - `GET /v1/users` - all users
//! - `GET /v1/roles` - all roles
//! - `GET /v1/roles/{uid}` - one role
//! - `GET /v1/cluster` - the cluster singleton
//!
//! Requests use HTTP Basic authentication and JSON content negotiation.
//! Responses are annotated with whatever rate-limit headers the cluster sent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use redis_iam_client::{ClientConfig, ClusterApi, RedisClient};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https://cluster.example.com", "9443", "admin@example.com", "secret");
//! let client = RedisClient::new(&config)?;
//!
//! let (users, _annotations) = client.list_users(&CancellationToken::new()).await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;

pub use client::{ClusterApi, RedisClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use models::{Cluster, Role, User};
