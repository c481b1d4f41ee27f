//! Grant derivation: cross-references users and roles
//!
//! Users carry the ids of the roles they hold; roles carry the management
//! level that labels the grant. Edges always originate from the role side.

use crate::resources::user_resource;
use redis_iam_client::{Role, User};
use redis_iam_core::{Grant, Resource};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// External identifier of a role grant: `role-grant:<role>:<user uid>:<management>`
pub fn role_grant_id(role_resource_id: &str, user_uid: u64, management: &str) -> String {
    format!("role-grant:{}:{}:{}", role_resource_id, user_uid, management)
}

/// Grants of `role` to every user holding it.
///
/// Grants come out in user order, then in each user's own role-id order.
/// A role id missing from `roles` yields no grant; the users and roles
/// endpoints are not read atomically, so this is logged and skipped. The
/// same (role, user, management) edge is emitted at most once.
pub fn derive_role_grants(role: &Resource, users: &[User], roles: &HashMap<u64, Role>) -> Vec<Grant> {
    let mut grants = Vec::new();
    let mut seen = HashSet::new();

    for user in users {
        for role_uid in &user.role_uids {
            if role_uid.to_string() != role.id.resource {
                continue;
            }

            let Some(cached) = roles.get(role_uid) else {
                warn!(
                    "User {} references role {} which is not in the role list; skipping grant",
                    user.uid, role_uid
                );
                continue;
            };

            let external_id = role_grant_id(&role.id.resource, user.uid, &cached.management);
            if !seen.insert(external_id.clone()) {
                continue;
            }

            let principal = user_resource(user, None);
            grants.push(
                Grant::new(role, cached.management.clone(), principal).with_external_id(external_id),
            );
        }
    }

    debug!("Derived {} grants for role {}", grants.len(), role.id.resource);
    grants
}
