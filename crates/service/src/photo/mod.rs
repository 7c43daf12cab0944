pub mod ingest;
pub mod storage;

pub use ingest::{PhotoIngestor, UploadedFile};
pub use storage::{BlobStorage, HttpBlobStorage, StorageError};
