//! Object storage client wrapper
//!
//! [`OssClient`] forwards single-shot upload, download and listing calls to
//! `aws-sdk-s3`. Request signing, retries and multipart handling stay inside
//! the SDK; this wrapper only selects the endpoint/credentials and converts
//! outcomes into typed results.

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::oss::config::{EndpointKind, OssProfile};
use crate::oss::error::{OssError, Result};
use crate::oss::types::{ListObjectsPage, ObjectInfo, ObjectMetadata, ObjectSummary};

/// Page size used when draining a full listing
const LIST_PAGE_SIZE: i32 = 100;

/// Connection settings for [`OssClient`]
#[derive(Debug, Clone, Default)]
pub struct OssClientConfig {
    /// Service endpoint URL; when `None` the SDK default resolution applies
    pub endpoint_url: Option<String>,
    /// Use path-style addressing (required by MinIO and some self-hosted stores)
    pub force_path_style: bool,
    pub region: Option<String>,
    /// Static credentials; when absent the SDK default provider chain is used
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl OssClientConfig {
    /// Derive connection settings from a stored profile
    pub fn from_profile(profile: &OssProfile, endpoint: EndpointKind) -> Self {
        Self {
            endpoint_url: Some(profile.endpoint_for(endpoint).to_string()),
            force_path_style: profile.path_style,
            region: profile.region.clone(),
            access_key_id: Some(profile.access_key_id.clone()),
            secret_access_key: Some(profile.access_key_secret.clone()),
        }
    }
}

/// Storage client with high-level single-call operations
pub struct OssClient {
    client: Client,
    current_region: String,
}

impl OssClient {
    /// Create a client from explicit connection settings
    pub async fn with_config(config: OssClientConfig) -> Result<Self> {
        let region = Region::new(
            config
                .region
                .clone()
                .unwrap_or_else(|| "us-east-1".to_string()),
        );

        let mut builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials =
                    Credentials::new(key_id.clone(), secret.clone(), None, None, "oss-client");
                aws_sdk_s3::config::Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .credentials_provider(credentials)
                    .region(region.clone())
            }
            _ => {
                let shared_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(region.clone())
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared_config)
            }
        };

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        builder = builder.force_path_style(config.force_path_style);

        let client = Client::from_conf(builder.build());
        let current_region = region.to_string();

        Ok(Self {
            client,
            current_region,
        })
    }

    /// Create a client from a stored profile and endpoint selection
    pub async fn from_profile(profile: &OssProfile, endpoint: EndpointKind) -> Result<Self> {
        Self::with_config(OssClientConfig::from_profile(profile, endpoint)).await
    }

    /// Download an object into memory
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(OssError::from_sdk)?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| OssError::Body(e.to_string()))?;

        tracing::info!(bucket, key, "get object succeeded");

        Ok(data.into_bytes().to_vec())
    }

    /// Download an object to a local file, streaming the body chunk-wise.
    /// Returns the number of bytes written.
    pub async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(OssError::from_sdk)?;

        let mut body = response.body;
        let copy = async {
            let mut file = tokio::fs::File::create(path.as_ref()).await?;
            let mut written: u64 = 0;

            while let Some(chunk) = body
                .try_next()
                .await
                .map_err(|e| OssError::Body(e.to_string()))?
            {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;

            Ok::<u64, OssError>(written)
        };

        match copy.await {
            Ok(written) => {
                tracing::info!(bucket, key, bytes = written, "get object to file succeeded");
                Ok(written)
            }
            Err(err) => {
                // A failed download must not leave a partial file behind
                let _ = tokio::fs::remove_file(path.as_ref()).await;
                Err(err)
            }
        }
    }

    /// Upload a byte buffer as an object
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data.into()))
            .send()
            .await
            .map_err(OssError::from_sdk)?;

        tracing::info!(bucket, key, "put object succeeded");

        Ok(())
    }

    /// Upload a local file as an object
    pub async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let body = ByteStream::from_path(path.as_ref())
            .await
            .map_err(|e| OssError::Body(e.to_string()))?;

        self.put_object_stream(bucket, key, body).await
    }

    /// Decode a standard base64 string and upload the result as an object
    pub async fn put_object_from_base64(
        &self,
        bucket: &str,
        key: &str,
        payload: &str,
    ) -> Result<()> {
        let data = BASE64.decode(payload)?;
        self.put_object(bucket, key, data).await
    }

    /// Upload an object from an arbitrary byte stream
    pub async fn put_object_stream(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(OssError::from_sdk)?;

        tracing::info!(bucket, key, "put object succeeded");

        Ok(())
    }

    /// Upload a local file with user metadata, cache-control and content-type
    /// attached
    pub async fn put_object_with_metadata(
        &self,
        bucket: &str,
        key: &str,
        path: impl AsRef<Path>,
        metadata: &ObjectMetadata,
    ) -> Result<()> {
        let body = ByteStream::from_path(path.as_ref())
            .await
            .map_err(|e| OssError::Body(e.to_string()))?;

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if !metadata.user_metadata.is_empty() {
            request = request.set_metadata(Some(metadata.user_metadata.clone()));
        }
        if let Some(cache_control) = &metadata.cache_control {
            request = request.cache_control(cache_control);
        }
        if let Some(content_type) = &metadata.content_type {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(OssError::from_sdk)?;

        tracing::info!(bucket, key, "put object with metadata succeeded");

        Ok(())
    }

    /// List one page of objects with optional prefix filter
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ListObjectsPage> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(max_keys);

        if let Some(p) = prefix {
            request = request.prefix(p);
        }

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(OssError::from_sdk)?;

        let objects = response
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or_default().to_string(),
                size: obj.size().unwrap_or(0) as u64,
                last_modified: obj.last_modified().map(|d| {
                    chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())
                        .unwrap_or_default()
                }),
                etag: obj.e_tag().map(|s| s.to_string()),
                storage_class: obj.storage_class().map(|s| s.as_str().to_string()),
            })
            .collect();

        Ok(ListObjectsPage {
            objects,
            next_token: response.next_continuation_token().map(|s| s.to_string()),
            is_truncated: response.is_truncated().unwrap_or(false),
        })
    }

    /// Drain all pages of a listing with optional prefix filter
    pub async fn list_all_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectSummary>> {
        let mut objects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self
                .list_objects(bucket, prefix, token.as_deref(), LIST_PAGE_SIZE)
                .await?;
            objects.extend(page.objects);

            if !page.is_truncated || page.next_token.is_none() {
                break;
            }
            token = page.next_token;
        }

        tracing::info!(bucket, total = objects.len(), "list objects succeeded");

        Ok(objects)
    }

    /// Fetch object attributes without the body; `None` if the object does
    /// not exist
    pub async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<ObjectInfo>> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(response) => Ok(Some(ObjectInfo {
                size: response.content_length().unwrap_or(0) as u64,
                content_type: response.content_type().map(|s| s.to_string()),
                cache_control: response.cache_control().map(|s| s.to_string()),
                etag: response.e_tag().map(|s| s.to_string()),
                last_modified: response.last_modified().map(|d| {
                    chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())
                        .unwrap_or_default()
                }),
                user_metadata: response.metadata().cloned().unwrap_or_default(),
            })),
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false) =>
            {
                Ok(None)
            }
            Err(err) => Err(OssError::from_sdk(err)),
        }
    }

    /// Check whether an object exists
    pub async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self.head_object(bucket, key).await?.is_some())
    }

    /// Create a bucket
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(OssError::from_sdk)?;

        tracing::info!(bucket, "create bucket succeeded");

        Ok(())
    }

    /// Get the configured region
    pub fn region(&self) -> &str {
        &self.current_region
    }
}
