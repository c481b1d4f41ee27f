//! Resource nodes and their kind-specific profiles

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of a resource node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// The cluster singleton
    Cluster,
    /// A management role
    Role,
    /// A cluster user (the only principal kind)
    User,
}

impl ResourceType {
    /// Stable identifier used in entitlement and grant ids
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Cluster => "cluster",
            ResourceType::Role => "role",
            ResourceType::User => "user",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::Cluster => "Cluster",
            ResourceType::Role => "Role",
            ResourceType::User => "User",
        }
    }

    /// Trait advertised for this kind
    pub fn resource_trait(&self) -> ResourceTrait {
        match self {
            ResourceType::Cluster => ResourceTrait::App,
            ResourceType::Role => ResourceTrait::Role,
            ResourceType::User => ResourceTrait::User,
        }
    }

    /// All kinds, in the order a discovery pass visits them
    pub fn all() -> [ResourceType; 3] {
        [ResourceType::User, ResourceType::Role, ResourceType::Cluster]
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster" => Ok(ResourceType::Cluster),
            "role" => Ok(ResourceType::Role),
            "user" => Ok(ResourceType::User),
            other => Err(CoreError::invalid(format!("unknown resource type: {}", other))),
        }
    }
}

/// Shape a resource kind exposes to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    App,
    Role,
    User,
}

/// Identity of a resource node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    /// Kind of the resource
    pub resource_type: ResourceType,

    /// Natural key of the resource (decimal uid, or name for the cluster)
    pub resource: String,
}

impl ResourceId {
    /// Create a new resource id
    pub fn new(resource_type: ResourceType, resource: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// Profile of the cluster singleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub name: String,
}

/// Profile of a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role_id: u64,
    pub name: String,
    pub management_role: String,
}

/// Account status reported for a user
///
/// The upstream status field is not mapped; every user is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Enabled,
}

/// Profile of a user, including the user trait fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub management_role: String,
    /// Comma-joined decimal role ids, empty when the user holds none
    pub role_uids: String,

    pub status: UserStatus,
    pub login: String,
}

/// Kind-specific payload of a resource node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    Cluster(ClusterProfile),
    Role(RoleProfile),
    User(UserProfile),
}

impl Profile {
    /// Kind this profile belongs to
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Profile::Cluster(_) => ResourceType::Cluster,
            Profile::Role(_) => ResourceType::Role,
            Profile::User(_) => ResourceType::User,
        }
    }

    /// Key/value view of the profile fields.
    ///
    /// Trait fields (user status and login) are not part of the profile map.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        match self {
            Profile::Cluster(p) => {
                map.insert("name", p.name.clone());
            }
            Profile::Role(p) => {
                map.insert("role_id", p.role_id.to_string());
                map.insert("name", p.name.clone());
                map.insert("management_role", p.management_role.clone());
            }
            Profile::User(p) => {
                map.insert("user_id", p.user_id.to_string());
                map.insert("username", p.username.clone());
                map.insert("email", p.email.clone());
                map.insert("management_role", p.management_role.clone());
                map.insert("role_uids", p.role_uids.clone());
            }
        }
        map
    }
}

/// Canonical resource node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,

    pub display_name: String,

    /// Owning resource; siblings in this API, so normally `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_resource_id: Option<ResourceId>,

    pub profile: Profile,
}

impl Resource {
    /// Create a resource whose kind is taken from its profile
    pub fn new(resource: impl Into<String>, display_name: impl Into<String>, profile: Profile) -> Self {
        Self {
            id: ResourceId::new(profile.resource_type(), resource),
            display_name: display_name.into(),
            parent_resource_id: None,
            profile,
        }
    }

    /// Attach an owning resource
    pub fn with_parent(mut self, parent: Option<&ResourceId>) -> Self {
        self.parent_resource_id = parent.cloned();
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.id.resource_type
    }
}
