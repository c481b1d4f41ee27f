//! Metadata attached to result pages

use serde::{Deserialize, Serialize};

/// Rate-limit state reported by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStatus {
    Ok,
    Overlimit,
}

/// Rate-limit headers decoded from one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDescription {
    pub status: RateLimitStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,

    /// Seconds until the window resets (or `Retry-After`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_after_secs: Option<u64>,
}

/// A single annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    RateLimit(RateLimitDescription),
    /// The response carried no rate-limit headers
    NoRateLimitData,
}

/// Ordered list of annotations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// Add an annotation, builder style
    pub fn with(mut self, annotation: Annotation) -> Self {
        self.push(annotation);
        self
    }

    /// Most recent rate-limit description, if any
    pub fn rate_limit(&self) -> Option<&RateLimitDescription> {
        self.0.iter().rev().find_map(|a| match a {
            Annotation::RateLimit(desc) => Some(desc),
            Annotation::NoRateLimitData => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Annotation> for Annotations {
    fn from(annotation: Annotation) -> Self {
        Self(vec![annotation])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_lookup() {
        let desc = RateLimitDescription {
            status: RateLimitStatus::Ok,
            limit: Some(100),
            remaining: Some(99),
            reset_after_secs: None,
        };

        let annotations = Annotations::new()
            .with(Annotation::NoRateLimitData)
            .with(Annotation::RateLimit(desc.clone()));

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.rate_limit(), Some(&desc));
    }

    #[test]
    fn test_no_rate_limit_data() {
        let annotations = Annotations::from(Annotation::NoRateLimitData);
        assert!(annotations.rate_limit().is_none());
        assert!(!annotations.is_empty());
    }
}
