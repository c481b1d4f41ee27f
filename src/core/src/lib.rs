//! # Redis IAM Core
//!
//! Graph model shared by the fetcher, the catalog builders and the CLI:
//! resource nodes, entitlements, grants, result pages and annotations.
//! This crate has no I/O.

pub mod types;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Annotation, Annotations, Entitlement, EntitlementPurpose, Grant, Graph, Page, Profile,
    RateLimitDescription, RateLimitStatus, Resource, ResourceId, ResourceTrait, ResourceType,
};
pub use types::resource::{ClusterProfile, RoleProfile, UserProfile, UserStatus};
