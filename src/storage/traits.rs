use async_trait::async_trait;
use bytes::Bytes;

/// Remote object storage holding uploaded documents
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Public URL of an object; does not check that the object exists
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload request failed: {0}")]
    Request(String),
    #[error("storage returned {status}: {body}")]
    Rejected { status: u16, body: String },
}
