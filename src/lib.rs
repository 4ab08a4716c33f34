//! Object Storage Client Library
//!
//! A thin client for S3-compatible object storage services. Connection
//! details come from preconfigured endpoint/credential profiles selected by
//! index; upload, download and listing are single calls into `aws-sdk-s3`,
//! which keeps ownership of signing, retries and multipart handling.

pub mod oss;

pub use oss::{
    EndpointKind, ListObjectsPage, ObjectInfo, ObjectMetadata, ObjectSummary, OssClient,
    OssClientConfig, OssError, OssProfile, ProfileStore, Result,
};
