//! Entitlements exposed by resource nodes

use super::resource::{Resource, ResourceId, ResourceType};
use serde::{Deserialize, Serialize};

/// What holding the entitlement means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    Permission,
}

/// A named permission exposed by exactly one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// `<kind>:<resource>:<slug>`
    pub id: String,

    /// Resource exposing the entitlement
    pub resource: ResourceId,

    /// Label of the entitlement (a role's management level)
    pub slug: String,

    pub display_name: String,

    pub description: String,

    pub purpose: EntitlementPurpose,

    /// Kinds that may hold this entitlement
    pub grantable_to: Vec<ResourceType>,
}

impl Entitlement {
    /// Compute the entitlement id for a resource and slug
    pub fn id_for(resource: &ResourceId, slug: &str) -> String {
        format!("{}:{}:{}", resource.resource_type, resource.resource, slug)
    }

    /// Create a permission entitlement on `resource`
    pub fn permission(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: Self::id_for(&resource.id, &slug),
            resource: resource.id.clone(),
            display_name: slug.clone(),
            description: String::new(),
            purpose: EntitlementPurpose::Permission,
            grantable_to: Vec::new(),
            slug,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_grantable_to(mut self, resource_type: ResourceType) -> Self {
        if !self.grantable_to.contains(&resource_type) {
            self.grantable_to.push(resource_type);
        }
        self
    }

    /// Whether a resource of `resource_type` may hold this entitlement
    pub fn is_grantable_to(&self, resource_type: ResourceType) -> bool {
        self.grantable_to.contains(&resource_type)
    }
}
