//! One page of syncer results

use super::annotations::Annotations;
use serde::{Deserialize, Serialize};

/// Items returned by a single `list`/`entitlements`/`grants` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Continuation token; the upstream API has no pagination so this is
    /// always `None` for the connectors in this workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,

    #[serde(default, skip_serializing_if = "Annotations::is_empty")]
    pub annotations: Annotations,
}

impl<T> Page<T> {
    /// A final page carrying `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
            annotations: Annotations::new(),
        }
    }

    /// An empty final page
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
