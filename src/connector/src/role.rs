//! Role catalog builder
//!
//! Roles are the only kind with entitlements and grants. Grant derivation
//! needs every user and every role, so the builder keeps both collections in
//! fetch-once caches for the lifetime of the pass.

use crate::cache::FetchOnce;
use crate::error::{ConnectorError, Result};
use crate::grants::derive_role_grants;
use crate::resources::role_resource;
use crate::syncer::ResourceSyncer;
use async_trait::async_trait;
use redis_iam_client::{ClusterApi, Role, User};
use redis_iam_core::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Role syncer with user/role caches for grant derivation
pub struct RoleBuilder {
    client: Arc<dyn ClusterApi>,

    /// All users, in API order
    users: FetchOnce<Vec<User>>,

    /// All roles, by uid
    roles: FetchOnce<HashMap<u64, Role>>,
}

impl RoleBuilder {
    pub fn new(client: Arc<dyn ClusterApi>) -> Self {
        Self {
            client,
            users: FetchOnce::new("users"),
            roles: FetchOnce::new("roles"),
        }
    }

    /// All users, fetched at most once per builder
    pub async fn cached_users(&self, cancel: &CancellationToken) -> Result<&[User]> {
        let users = self
            .users
            .get_or_fetch(|| async {
                let (users, _) = self.client.list_users(cancel).await?;
                Ok(users)
            })
            .await?;

        Ok(users.as_slice())
    }

    /// All roles by uid, fetched at most once per builder
    pub async fn cached_roles(&self, cancel: &CancellationToken) -> Result<&HashMap<u64, Role>> {
        self.roles
            .get_or_fetch(|| async {
                let (roles, _) = self.client.list_roles(cancel).await?;
                Ok(roles.into_iter().map(|role| (role.uid, role)).collect())
            })
            .await
    }

    pub fn users_cache(&self) -> &FetchOnce<Vec<User>> {
        &self.users
    }

    pub fn roles_cache(&self) -> &FetchOnce<HashMap<u64, Role>> {
        &self.roles
    }
}

fn ensure_role(resource: &Resource) -> Result<()> {
    if resource.resource_type() != ResourceType::Role {
        return Err(ConnectorError::InvalidInput(format!(
            "expected a role resource, got {}",
            resource.id
        )));
    }
    Ok(())
}

#[async_trait]
impl ResourceSyncer for RoleBuilder {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Role
    }

    async fn list(
        &self,
        parent: Option<&ResourceId>,
        cancel: &CancellationToken,
    ) -> Result<Page<Resource>> {
        let (roles, annotations) = self.client.list_roles(cancel).await?;

        let resources: Vec<_> = roles.iter().map(|role| role_resource(role, parent)).collect();

        debug!("Listed {} role resources", resources.len());
        Ok(Page::new(resources).with_annotations(annotations))
    }

    /// One permission entitlement per role, labelled with the management
    /// level from the role's detail endpoint (not the bulk list).
    async fn entitlements(
        &self,
        resource: &Resource,
        cancel: &CancellationToken,
    ) -> Result<Page<Entitlement>> {
        ensure_role(resource)?;

        let (role, annotations) = self
            .client
            .get_role_details(&resource.id.resource, cancel)
            .await?;

        let entitlement = Entitlement::permission(resource, role.management.clone())
            .with_grantable_to(ResourceType::User)
            .with_description(format!(
                "Role {} with management {} in Redis",
                role.name, role.management
            ))
            .with_display_name(format!("{} Role {}", resource.display_name, role.management));

        Ok(Page::new(vec![entitlement]).with_annotations(annotations))
    }

    async fn grants(&self, resource: &Resource, cancel: &CancellationToken) -> Result<Page<Grant>> {
        ensure_role(resource)?;

        let users = self.cached_users(cancel).await?;
        let roles = self.cached_roles(cancel).await?;

        Ok(Page::new(derive_role_grants(resource, users, roles)))
    }
}
