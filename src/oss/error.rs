//! Typed errors for storage operations
//!
//! Service failures keep the provider's diagnostic fields (error code,
//! message, request ID and extended request ID) so callers can match on
//! the cause instead of parsing a formatted message.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::{RequestId, RequestIdExt};

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, OssError>;

/// Errors returned by [`OssClient`](crate::oss::client::OssClient) operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OssError {
    /// The storage service rejected the request
    #[error("service error {code}: {message} (request id: {request_id}, host id: {host_id})")]
    Service {
        code: String,
        message: String,
        request_id: String,
        host_id: String,
    },

    /// The request never produced a service response (DNS, timeout, TLS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read or streamed
    #[error("failed to read object body: {0}")]
    Body(String),

    /// Local file I/O failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The upload payload was not valid base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// No storage profile is configured at the given index
    #[error("no storage profile at index {0}")]
    ProfileNotFound(usize),
}

impl OssError {
    /// Convert an SDK operation error, extracting service diagnostics when present.
    pub(crate) fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + RequestId + RequestIdExt + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        match err.as_service_error() {
            Some(service) => OssError::Service {
                code: service.code().unwrap_or("Unknown").to_string(),
                message: service.message().unwrap_or_default().to_string(),
                request_id: service.request_id().unwrap_or("<none>").to_string(),
                host_id: service.extended_request_id().unwrap_or("<none>").to_string(),
            },
            None => OssError::Transport(DisplayErrorContext(&err).to_string()),
        }
    }

    /// Whether this is a service-side rejection (as opposed to a local or
    /// transport failure)
    pub fn is_service_error(&self) -> bool {
        matches!(self, OssError::Service { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_carries_diagnostics() {
        let err = OssError::Service {
            code: "NoSuchKey".to_string(),
            message: "The specified key does not exist.".to_string(),
            request_id: "5CAC0CF8DE0170".to_string(),
            host_id: "bucket.oss.example.com".to_string(),
        };

        let rendered = err.to_string();
        assert!(rendered.contains("NoSuchKey"));
        assert!(rendered.contains("The specified key does not exist."));
        assert!(rendered.contains("5CAC0CF8DE0170"));
        assert!(rendered.contains("bucket.oss.example.com"));
    }

    #[test]
    fn test_is_service_error() {
        let service = OssError::Service {
            code: "AccessDenied".to_string(),
            message: String::new(),
            request_id: "<none>".to_string(),
            host_id: "<none>".to_string(),
        };
        assert!(service.is_service_error());
        assert!(!OssError::ProfileNotFound(3).is_service_error());
        assert!(!OssError::Transport("connection refused".to_string()).is_service_error());
    }

    #[test]
    fn test_profile_not_found_names_index() {
        let err = OssError::ProfileNotFound(2);
        assert_eq!(err.to_string(), "no storage profile at index 2");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: OssError = io.into();
        assert!(matches!(err, OssError::Io(_)));
    }
}
