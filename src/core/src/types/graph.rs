//! Materialized output of a discovery pass

use super::entitlement::Entitlement;
use super::grant::Grant;
use super::resource::{Resource, ResourceType};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Resources, entitlements and grants collected during one pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,

    #[serde(skip)]
    grant_ids: HashSet<String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn add_entitlement(&mut self, entitlement: Entitlement) {
        self.entitlements.push(entitlement);
    }

    /// Add a grant; returns `false` if a grant with the same id was already
    /// recorded during this pass
    pub fn add_grant(&mut self, grant: Grant) -> bool {
        if !self.grant_ids.insert(grant.id.clone()) {
            return false;
        }
        self.grants.push(grant);
        true
    }

    /// Resources of one kind, in insertion order
    pub fn resources_of(&self, resource_type: ResourceType) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |r| r.resource_type() == resource_type)
    }

    /// Grants whose entitlement lives on the resource with id `resource`
    pub fn grants_on<'a>(
        &'a self,
        resource_type: ResourceType,
        resource: &'a str,
    ) -> impl Iterator<Item = &'a Grant> + 'a {
        self.grants.iter().filter(move |g| {
            g.resource.resource_type == resource_type && g.resource.resource == resource
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
