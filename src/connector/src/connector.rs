//! Connector: bundles the per-kind builders behind one client

use crate::cluster::ClusterBuilder;
use crate::error::Result;
use crate::role::RoleBuilder;
use crate::syncer::ResourceSyncer;
use crate::user::UserBuilder;
use redis_iam_client::{ClientConfig, ClusterApi, RedisClient};
use redis_iam_core::{Annotations, ResourceTrait, ResourceType};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Descriptive metadata for consumers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
    pub resource_types: Vec<ResourceTypeInfo>,
}

/// A resource kind as advertised to consumers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTypeInfo {
    pub resource_type: ResourceType,
    pub display_name: &'static str,
    pub resource_trait: ResourceTrait,
}

impl From<ResourceType> for ResourceTypeInfo {
    fn from(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            display_name: resource_type.display_name(),
            resource_trait: resource_type.resource_trait(),
        }
    }
}

/// Redis Enterprise connector
///
/// Builders are created fresh per connector, so their caches live exactly as
/// long as the connector. Build a new connector for every discovery pass.
pub struct Connector {
    client: Arc<dyn ClusterApi>,
    users: Arc<UserBuilder>,
    roles: Arc<RoleBuilder>,
    clusters: Arc<ClusterBuilder>,
}

impl Connector {
    pub fn new(client: Arc<dyn ClusterApi>) -> Self {
        Self {
            users: Arc::new(UserBuilder::new(Arc::clone(&client))),
            roles: Arc::new(RoleBuilder::new(Arc::clone(&client))),
            clusters: Arc::new(ClusterBuilder::new(Arc::clone(&client))),
            client,
        }
    }

    /// Validate `config` and connect a [`RedisClient`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = RedisClient::new(config)?;
        info!("Connector configured for {}", client.base_url());
        Ok(Self::new(Arc::new(client)))
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Redis".to_string(),
            description: "Users, roles and cluster of a Redis Enterprise cluster".to_string(),
            resource_types: ResourceType::all().into_iter().map(ResourceTypeInfo::from).collect(),
        }
    }

    /// Check credentials and reachability with one cluster fetch
    pub async fn validate(&self, cancel: &CancellationToken) -> Result<Annotations> {
        let (clusters, annotations) = self.client.list_clusters(cancel).await?;
        for cluster in &clusters {
            info!("Connected to cluster {}", cluster.name);
        }
        Ok(annotations)
    }

    /// Syncers in the order a pass visits them: users, roles, cluster
    pub fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            self.users.clone() as Arc<dyn ResourceSyncer>,
            self.roles.clone() as Arc<dyn ResourceSyncer>,
            self.clusters.clone() as Arc<dyn ResourceSyncer>,
        ]
    }
}
