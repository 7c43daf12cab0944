use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use super::storage::BlobStorage;
use crate::cat_service;
use crate::errors::ServiceError;
use models::photo;

/// A file pulled out of a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Extension as submitted, text after the last dot. A dotless filename
/// has none; the key then carries no suffix rather than a guessed one.
fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Storage key: six hex chars of a fresh UUID plus the original
/// extension. Collisions are accepted as negligible; no existence check.
pub fn storage_key(filename: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let short = &id[..6];
    match extension(filename) {
        Some(ext) => format!("{}.{}", short, ext),
        None => short.to_string(),
    }
}

/// Uploads photo bytes to the blob store and records the resulting URL.
/// Built once from the storage config; no process-wide constants.
pub struct PhotoIngestor {
    storage: Arc<dyn BlobStorage>,
    bucket: String,
    base_url: String,
}

impl PhotoIngestor {
    pub fn new(cfg: &configs::StorageConfig, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            storage,
            bucket: cfg.bucket.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }

    /// Best-effort ingestion. No file is a no-op; an upload failure is
    /// logged and swallowed so the surrounding flow still redirects.
    /// Only a missing cat or a failed DB write surfaces as an error.
    pub async fn ingest(
        &self,
        db: &DatabaseConnection,
        cat_id: Uuid,
        file: Option<UploadedFile>,
    ) -> Result<Option<photo::Model>, ServiceError> {
        cat_service::get_cat(db, cat_id).await?;
        let Some(file) = file else {
            return Ok(None);
        };

        let key = storage_key(&file.filename);
        match self.storage.upload(&file.bytes, &self.bucket, &key).await {
            Ok(()) => {}
            Err(cause) => {
                warn!(%cat_id, %key, error = %cause, "photo upload failed; continuing");
                return Ok(None);
            }
        }

        let url = self.public_url(&key);
        let saved = photo::create(db, cat_id, &url).await?;
        info!(%cat_id, %key, url = %saved.url, "photo ingested");
        Ok(Some(saved))
    }
}
