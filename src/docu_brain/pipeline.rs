use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::session::{DocFile, DocumentSession, TransitionError};
use crate::ai::AiClient;
use crate::models::UploadFile;
use crate::state::AppState;
use crate::storage::client::local_preview_url;
use crate::storage::StorageClient;

/// Upload then extract every dropped file, one file at a time.
#[derive(Clone)]
pub struct DocumentPipeline {
    session: Arc<RwLock<DocumentSession>>,
    ai: Arc<AiClient>,
    storage: Arc<StorageClient>,
    bucket: String,
}

impl DocumentPipeline {
    pub fn new(
        session: Arc<RwLock<DocumentSession>>,
        ai: Arc<AiClient>,
        storage: Arc<StorageClient>,
        bucket: &str,
    ) -> Self {
        Self {
            session,
            ai,
            storage,
            bucket: bucket.to_string(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.documents.clone(),
            state.ai.clone(),
            state.storage.clone(),
            &state.bucket,
        )
    }

    /// Register a batch of dropped files and process it.
    ///
    /// Files that are neither images nor PDFs are skipped. Every accepted
    /// file shows up as `uploading` before the first network call; the batch
    /// then runs serially and each file ends in `done` or `error`. Returns
    /// the ids of the accepted files in drop order.
    pub async fn on_drop(&self, files: Vec<UploadFile>) -> Vec<String> {
        let mut ids = Vec::with_capacity(files.len());
        {
            let mut session = self.session.write().await;
            for file in files {
                if !file.is_accepted() {
                    warn!(name = %file.name, mime = %file.mime_type, "Rejected file: only images and PDF are accepted");
                    continue;
                }
                let preview = local_preview_url(&file);
                let doc = DocFile::new(file, preview);
                ids.push(doc.id.clone());
                session.add(doc);
            }
        }

        info!("📥 Processing {} dropped file(s)", ids.len());
        for id in &ids {
            if let Err(e) = self.process(id).await {
                error!(id = %id, error = %e, "Document state update rejected");
            }
        }
        ids
    }

    async fn process(&self, id: &str) -> Result<(), TransitionError> {
        let file = {
            let session = self.session.read().await;
            session
                .get(id)
                .map(|doc| doc.file.clone())
                .ok_or_else(|| TransitionError::UnknownFile(id.to_string()))?
        };

        let Some(url) = self.storage.upload_file(&file, &self.bucket, None).await else {
            warn!(name = %file.name, "Upload failed");
            return self.session.write().await.update(id, DocFile::fail);
        };
        self.session
            .write()
            .await
            .update(id, |doc| doc.mark_uploaded(url))?;

        match self.ai.try_extract_document(&file).await {
            Ok(data) => {
                info!(name = %file.name, document_type = %data.document_type, "✅ Document analyzed");
                self.session
                    .write()
                    .await
                    .update(id, |doc| doc.complete(data))
            }
            Err(e) => {
                error!(name = %file.name, error = %e, "Error processing file");
                self.session.write().await.update(id, DocFile::fail)
            }
        }
    }

    /// Current state of the session
    pub async fn snapshot(&self) -> Vec<DocFile> {
        self.session.read().await.files().to_vec()
    }
}
