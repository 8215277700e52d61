#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Notify};

use immo_sniper::ai::{AiClient, AiError, ContentPart, GenerativeModel};
use immo_sniper::storage::{ObjectStore, StorageError};

pub const ANALYSIS_JSON: &str = r#"{"urgencyScore": 88, "urgencyReasoning": "Divorce et vente rapide", "suggestedOutreach": {"sms": "Bonjour, votre maison m'intéresse", "emailSubject": "Votre maison à Bordeaux", "emailBody": "Madame, Monsieur"}}"#;

pub const DPE_JSON: &str = r#"{"type": "DPE", "surface": 65, "energyClass": "D", "gesClass": "E", "address": "12 rue Sainte-Catherine, Bordeaux", "ownerName": null, "consommation": 245}"#;

/// Model that answers from a script, then fails once the script runs out
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    pub calls: Mutex<Vec<(String, Vec<ContentPart>)>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, AiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::default(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, model: &str, parts: Vec<ContentPart>) -> Result<String, AiError> {
        self.calls.lock().unwrap().push((model.to_string(), parts));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::Request("connection refused".to_string())))
    }
}

/// Model that blocks until released, to observe in-flight state
pub struct GatedModel {
    pub release: Notify,
    reply: String,
}

impl GatedModel {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            release: Notify::new(),
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl GenerativeModel for GatedModel {
    async fn generate(&self, _model: &str, _parts: Vec<ContentPart>) -> Result<String, AiError> {
        self.release.notified().await;
        Ok(self.reply.clone())
    }
}

pub fn ai_client(model: Arc<dyn GenerativeModel>) -> Arc<AiClient> {
    Arc::new(AiClient::new(model))
}

/// Object store that records uploads and can be told to reject them
#[derive(Default)]
pub struct RecordingStore {
    pub reject: bool,
    pub uploads: Mutex<Vec<(String, String, usize, String)>>,
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.reject {
            return Err(StorageError::Rejected {
                status: 403,
                body: "new row violates row-level security policy".to_string(),
            });
        }
        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            path.to_string(),
            bytes.len(),
            content_type.to_string(),
        ));
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, path)
    }
}

/// Object store whose uploads block until released, one `notify_one` per upload
#[derive(Default)]
pub struct GatedStore {
    pub release: Notify,
    started: AtomicUsize,
    pub uploads: Mutex<Vec<(String, Bytes)>>,
}

impl GatedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Uploads that have begun, finished or not
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for GatedStore {
    async fn upload(
        &self,
        _bucket: &str,
        path: &str,
        bytes: Bytes,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        self.uploads.lock().unwrap().push((path.to_string(), bytes));
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, path)
    }
}

/// Serve `app` on a random local port; returns its base URL
pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Gemini `generateContent` envelope around `text`
pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}
