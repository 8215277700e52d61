use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::ai::{AiClient, GeminiClient};
use crate::config::Config;
use crate::docu_brain::DocumentSession;
use crate::sources::AdSource;
use crate::storage::{StorageClient, SupabaseStore};
use crate::store::AdStore;

/// Everything a dashboard session needs, created once at start-up and
/// handed to the sniper board and the document pipeline.
#[derive(Clone)]
pub struct AppState {
    pub ads: Arc<RwLock<AdStore>>,
    pub documents: Arc<RwLock<DocumentSession>>,
    pub ai: Arc<AiClient>,
    pub storage: Arc<StorageClient>,
    pub bucket: String,
}

impl AppState {
    pub fn new(ai: AiClient, storage: StorageClient) -> Self {
        Self {
            ads: Arc::new(RwLock::new(AdStore::default())),
            documents: Arc::new(RwLock::new(DocumentSession::default())),
            ai: Arc::new(ai),
            storage: Arc::new(storage),
            bucket: crate::storage::DEFAULT_BUCKET.to_string(),
        }
    }

    /// Build the real clients described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.ai.api_key.is_empty() {
            warn!("No Gemini API key configured; AI calls will fail and fall back");
        }
        let gemini = GeminiClient::with_base_url(&config.ai.base_url, &config.ai.api_key)?;
        let ai = AiClient::new(Arc::new(gemini))
            .with_models(&config.ai.scoring_model, &config.ai.extraction_model);

        let storage = match &config.storage {
            Some(s) => {
                info!(url = %s.url, "Using Supabase storage");
                StorageClient::new(Arc::new(SupabaseStore::new(&s.url, &s.api_key)?))
            }
            None => StorageClient::demo(),
        }
        .with_mock_delay(config.mock_upload_delay);

        let mut state = Self::new(ai, storage);
        state.bucket = config.bucket.clone();
        Ok(state)
    }

    /// Replace the ad collection with a fresh pull from `source`
    pub async fn load_ads(&self, source: &dyn AdSource) -> Result<usize> {
        self.ads.write().await.is_loading = true;
        let ads = match source.fetch_ads().await {
            Ok(ads) => ads,
            Err(e) => {
                self.ads.write().await.is_loading = false;
                return Err(e);
            }
        };
        let count = ads.len();
        let mut store = self.ads.write().await;
        store.is_loading = false;
        store.set_ads(ads);
        info!(source = source.source_name(), count, "ads loaded");
        Ok(count)
    }
}
