//! Grants: principal → entitlement edges

use super::entitlement::Entitlement;
use super::resource::{Resource, ResourceId};
use serde::{Deserialize, Serialize};

/// Edge asserting that `principal` holds entitlement `slug` on `resource`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// `<entitlement id>:<principal kind>:<principal id>`
    pub id: String,

    pub entitlement_id: String,

    /// Resource exposing the entitlement
    pub resource: ResourceId,

    /// Entitlement label
    pub slug: String,

    pub principal: Resource,

    /// Upstream-style identifier of the edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Grant {
    /// Create a grant of entitlement `slug` on `resource` to `principal`
    pub fn new(resource: &Resource, slug: impl Into<String>, principal: Resource) -> Self {
        let slug = slug.into();
        let entitlement_id = Entitlement::id_for(&resource.id, &slug);
        let id = format!("{}:{}", entitlement_id, principal.id);

        Self {
            id,
            entitlement_id,
            resource: resource.id.clone(),
            slug,
            principal,
            external_id: None,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Identity of the edge: (resource, principal, entitlement label)
    pub fn key(&self) -> (&ResourceId, &ResourceId, &str) {
        (&self.resource, &self.principal.id, &self.slug)
    }
}
