//! Per-kind syncer contract consumed by the discovery driver

use crate::error::Result;
use async_trait::async_trait;
use redis_iam_core::{Entitlement, Grant, Page, Resource, ResourceId, ResourceType};
use tokio_util::sync::CancellationToken;

/// Discovery protocol for one resource kind
///
/// A driver calls `list` first, then `entitlements` and `grants` for every
/// listed resource. Implementations must be safe to call concurrently.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> ResourceType;

    /// Resources of this kind, in upstream order
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        cancel: &CancellationToken,
    ) -> Result<Page<Resource>>;

    /// Entitlements exposed by `resource`
    async fn entitlements(
        &self,
        resource: &Resource,
        cancel: &CancellationToken,
    ) -> Result<Page<Entitlement>>;

    /// Grants of `resource`'s entitlements
    async fn grants(&self, resource: &Resource, cancel: &CancellationToken) -> Result<Page<Grant>>;
}
