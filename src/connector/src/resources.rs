//! Translators from wire records to resource nodes
//!
//! All functions here are pure: the same record always yields the same
//! node. Ids come from natural keys (numeric uid, or the cluster name), never
//! from a record's position in its collection.

use redis_iam_client::{Cluster, Role, User};
use redis_iam_core::{
    ClusterProfile, Profile, Resource, ResourceId, RoleProfile, UserProfile, UserStatus,
};

/// Node for the cluster singleton, keyed by name
pub fn cluster_resource(cluster: &Cluster, parent: Option<&ResourceId>) -> Resource {
    let profile = Profile::Cluster(ClusterProfile {
        name: cluster.name.clone(),
    });

    Resource::new(cluster.name.clone(), cluster.name.clone(), profile).with_parent(parent)
}

/// Node for a role, keyed by decimal uid
pub fn role_resource(role: &Role, parent: Option<&ResourceId>) -> Resource {
    let profile = Profile::Role(RoleProfile {
        role_id: role.uid,
        name: role.name.clone(),
        management_role: role.management.clone(),
    });

    Resource::new(role.uid.to_string(), role.name.clone(), profile).with_parent(parent)
}

/// Node for a user, keyed by decimal uid.
///
/// The upstream `status` field is not mapped yet; every user is reported as
/// enabled.
pub fn user_resource(user: &User, parent: Option<&ResourceId>) -> Resource {
    let profile = Profile::User(UserProfile {
        user_id: user.uid,
        username: user.name.clone(),
        email: user.email.clone(),
        management_role: user.role.clone(),
        role_uids: join_role_uids(&user.role_uids),
        status: UserStatus::Enabled,
        login: user.name.clone(),
    });

    Resource::new(user.uid.to_string(), user.name.clone(), profile).with_parent(parent)
}

/// Comma-joined decimal role ids; empty input gives an empty string
pub fn join_role_uids(role_uids: &[u64]) -> String {
    role_uids
        .iter()
        .map(|uid| uid.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
