//! User catalog builder

use crate::error::Result;
use crate::resources::user_resource;
use crate::syncer::ResourceSyncer;
use async_trait::async_trait;
use redis_iam_client::ClusterApi;
use redis_iam_core::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lists users as principals.
///
/// Users expose no entitlements and own no grants: every permission edge is
/// emitted from the role side so no relationship is counted twice.
pub struct UserBuilder {
    client: Arc<dyn ClusterApi>,
}

impl UserBuilder {
    pub fn new(client: Arc<dyn ClusterApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for UserBuilder {
    fn resource_type(&self) -> ResourceType {
        ResourceType::User
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        cancel: &CancellationToken,
    ) -> Result<Page<Resource>> {
        let (users, annotations) = self.client.list_users(cancel).await?;

        let resources: Vec<_> = users.iter().map(|user| user_resource(user, parent)).collect();

        debug!("Listed {} user resources", resources.len());
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
