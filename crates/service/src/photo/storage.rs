use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("network error: {0}")]
    Network(String),
    #[error("store rejected upload with status {status}")]
    Rejected { status: u16 },
}

/// The blob-store collaborator: fire bytes at `bucket/key`, succeed or
/// fail. The public URL is built by the caller, never trusted from the
/// store.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(&self, bytes: &[u8], bucket: &str, key: &str) -> Result<(), StorageError>;
}

/// HTTP implementation PUTting against an S3-compatible endpoint. The
/// client carries an explicit timeout; expiry counts as upload failure.
pub struct HttpBlobStorage {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBlobStorage {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Network(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl BlobStorage for HttpBlobStorage {
    async fn upload(&self, bytes: &[u8], bucket: &str, key: &str) -> Result<(), StorageError> {
        let url = format!("{}/{}/{}", self.endpoint, bucket, key);
        let resp = self
            .client
            .put(&url)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(StorageError::Rejected { status: resp.status().as_u16() });
        }
        Ok(())
    }
}

pub mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{BlobStorage, StorageError};

    /// Records uploads instead of sending them; optionally fails every
    /// call to exercise the best-effort path.
    #[derive(Default)]
    pub struct MockBlobStorage {
        pub fail: bool,
        pub uploads: Mutex<Vec<(String, String, usize)>>,
    }

    impl MockBlobStorage {
        pub fn failing() -> Self {
            Self { fail: true, uploads: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl BlobStorage for MockBlobStorage {
        async fn upload(&self, bytes: &[u8], bucket: &str, key: &str) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Network("mock refused".into()));
            }
            self.uploads
                .lock()
                .expect("mock lock")
                .push((bucket.to_string(), key.to_string(), bytes.len()));
            Ok(())
        }
    }
}
