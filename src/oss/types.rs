//! Object storage data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary of a stored object, as returned by listing operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub storage_class: Option<String>,
}

impl ObjectSummary {
    /// Get the display name (last component of the key)
    pub fn display_name(&self) -> &str {
        self.key
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.key)
    }
}

/// One page of a paginated listing
#[derive(Debug, Clone)]
pub struct ListObjectsPage {
    pub objects: Vec<ObjectSummary>,
    /// Opaque cursor for resuming the listing, present when truncated
    pub next_token: Option<String>,
    pub is_truncated: bool,
}

/// Object attributes returned by a metadata probe
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub size: u64,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub user_metadata: HashMap<String, String>,
}

/// Metadata attached to an object at upload time
#[derive(Debug, Clone, Default)]
pub struct ObjectMetadata {
    pub user_metadata: HashMap<String, String>,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
}

impl ObjectMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user metadata key/value pair
    pub fn with_user_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }
}
