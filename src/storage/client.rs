use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use super::traits::ObjectStore;
use crate::models::UploadFile;

pub const DEFAULT_BUCKET: &str = "documents";
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1500);

/// Uploads documents to object storage.
///
/// Without a configured backend it runs in demo mode: it waits for a
/// simulated network delay and hands back the file's local preview
/// reference instead of a public URL.
#[derive(Clone)]
pub struct StorageClient {
    backend: Option<Arc<dyn ObjectStore>>,
    mock_delay: Duration,
}

impl StorageClient {
    pub fn new(backend: Arc<dyn ObjectStore>) -> Self {
        Self {
            backend: Some(backend),
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }

    pub fn demo() -> Self {
        Self {
            backend: None,
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }

    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Upload `file` to `bucket` under `path` (or `<unix-millis>_<name>`).
    ///
    /// Returns the public URL, or `None` when the backend rejected the upload.
    pub async fn upload_file(&self, file: &UploadFile, bucket: &str, path: Option<&str>) -> Option<String> {
        let Some(backend) = &self.backend else {
            warn!("Storage not configured. Using mock upload.");
            tokio::time::sleep(self.mock_delay).await;
            return Some(local_preview_url(file));
        };

        let path = match path {
            Some(p) => p.to_string(),
            None => format!("{}_{}", Utc::now().timestamp_millis(), file.name),
        };

        match backend
            .upload(bucket, &path, file.bytes.clone(), &file.mime_type)
            .await
        {
            Ok(()) => {
                let url = backend.public_url(bucket, &path);
                info!(bucket, path = %path, "📤 Uploaded {}", file.name);
                Some(url)
            }
            Err(e) => {
                error!(bucket, path = %path, error = %e, "Upload failed");
                None
            }
        }
    }
}

/// Non-persistent reference usable for a local preview of `file`
pub fn local_preview_url(file: &UploadFile) -> String {
    match &file.source_path {
        Some(path) => format!("file://{}", path.display()),
        None => format!("blob:local/{}", uuid::Uuid::new_v4()),
    }
}
