//! Graph types

pub mod annotations;
pub mod entitlement;
pub mod grant;
pub mod graph;
pub mod page;
pub mod resource;

// Re-export commonly used types
pub use annotations::{Annotation, Annotations, RateLimitDescription, RateLimitStatus};
pub use entitlement::{Entitlement, EntitlementPurpose};
pub use grant::Grant;
pub use graph::Graph;
pub use page::Page;
pub use resource::{Profile, Resource, ResourceId, ResourceTrait, ResourceType};
