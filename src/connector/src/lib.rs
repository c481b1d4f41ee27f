//! # Redis Enterprise Identity Connector
//!
//! Discovers the users, roles and cluster of a Redis Enterprise deployment
//! and expresses them as resources, entitlements and grants.
//!
//! ## Features
//!
//! - **Catalog builders** for users, roles and the cluster singleton
//! - **Grant derivation** from each user's role ids, emitted from the role side
//! - **Fetch-once caches** so a pass reads `/v1/users` and `/v1/roles` once
//! - **Cancellation** through a shared [`CancellationToken`](tokio_util::sync::CancellationToken)
//!
//! ## Example
//!
//! ```rust,no_run
//! use redis_iam_client::ClientConfig;
//! use redis_iam_connector::{run_pass, Connector};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://redis.example.com", "9443", "admin", "secret");
//!     let connector = Connector::from_config(&config)?;
//!
//!     let graph = run_pass(&connector, &CancellationToken::new()).await?;
//!     println!("{} grants", graph.grants.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cluster;
pub mod connector;
pub mod discovery;
pub mod error;
pub mod grants;
pub mod resources;
pub mod role;
pub mod syncer;
pub mod user;

// Re-export commonly used types
pub use cache::FetchOnce;
pub use cluster::ClusterBuilder;
pub use connector::{Connector, ConnectorMetadata, ResourceTypeInfo};
pub use discovery::run_pass;
pub use error::{ConnectorError, Result};
pub use grants::{derive_role_grants, role_grant_id};
pub use role::RoleBuilder;
pub use syncer::ResourceSyncer;
pub use user::UserBuilder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
