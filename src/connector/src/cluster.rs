//! Cluster catalog builder

use crate::error::Result;
use crate::resources::cluster_resource;
use crate::syncer::ResourceSyncer;
use async_trait::async_trait;
use redis_iam_client::ClusterApi;
use redis_iam_core::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lists the cluster singleton. Clusters are informational leaves: they
/// expose no entitlements and hold no grants.
pub struct ClusterBuilder {
    client: Arc<dyn ClusterApi>,
}

impl ClusterBuilder {
    pub fn new(client: Arc<dyn ClusterApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for ClusterBuilder {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Cluster
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        cancel: &CancellationToken,
    ) -> Result<Page<Resource>> {
        // The API has no pagination.
        let (clusters, annotations) = self.client.list_clusters(cancel).await?;

        let resources: Vec<_> = clusters
            .iter()
            .map(|cluster| cluster_resource(cluster, parent))
            .collect();

        debug!("Listed {} cluster resources", resources.len());
        Ok(Page::new(resources).with_annotations(annotations))
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _cancel: &CancellationToken,
    ) -> Result<Page<Entitlement>> {
        Ok(Page::empty())
    }

    async fn grants(&self, _resource: &Resource, _cancel: &CancellationToken) -> Result<Page<Grant>> {
        Ok(Page::empty())
    }
}
