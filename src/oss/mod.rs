//! Object storage client module
//!
//! This module provides the storage functionality:
//! - [`client::OssClient`] - High-level single-call operations wrapper
//! - [`config::ProfileStore`] - Endpoint/credential profile management
//! - [`error::OssError`] - Typed operation errors
//! - [`types`] - Data types (ObjectSummary, ListObjectsPage, ObjectMetadata)

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use client::{OssClient, OssClientConfig};
pub use config::{EndpointKind, OssProfile, ProfileStore};
pub use error::{OssError, Result};
pub use types::{ListObjectsPage, ObjectInfo, ObjectMetadata, ObjectSummary};
