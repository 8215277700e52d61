//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::ai::client::{DEFAULT_EXTRACTION_MODEL, DEFAULT_SCORING_MODEL};
use crate::ai::gemini::DEFAULT_BASE_URL;
use crate::storage::client::{DEFAULT_BUCKET, DEFAULT_MOCK_DELAY};

/// Generative-AI endpoint settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key; empty when unset, in which case calls fail and fall back
    pub api_key: String,
    pub base_url: String,
    pub scoring_model: String,
    pub extraction_model: String,
}

/// Object storage settings. Only present when both URL and key are set.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ai: AiConfig,
    /// `None` switches uploads to demo mode
    pub storage: Option<StorageConfig>,
    pub bucket: String,
    pub mock_upload_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. The `NEXT_PUBLIC_` names used by the web
    /// dashboard are accepted as fallbacks for the AI key and storage settings.
    pub fn from_env() -> Result<Self> {
        let ai = AiConfig {
            api_key: var_any(&["GEMINI_API_KEY", "NEXT_PUBLIC_GEMINI_API_KEY"]).unwrap_or_default(),
            base_url: var_any(&["GEMINI_BASE_URL"]).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            scoring_model: var_any(&["GEMINI_SCORING_MODEL"])
                .unwrap_or_else(|| DEFAULT_SCORING_MODEL.to_string()),
            extraction_model: var_any(&["GEMINI_EXTRACTION_MODEL"])
                .unwrap_or_else(|| DEFAULT_EXTRACTION_MODEL.to_string()),
        };

        let storage = match (
            var_any(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
            var_any(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
        ) {
            (Some(url), Some(api_key)) => Some(StorageConfig { url, api_key }),
            _ => None,
        };

        let mock_upload_delay = match var_any(&["MOCK_UPLOAD_DELAY_MS"]) {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .with_context(|| format!("MOCK_UPLOAD_DELAY_MS must be a number of milliseconds, got {raw:?}"))?,
            ),
            None => DEFAULT_MOCK_DELAY,
        };

        Ok(Self {
            ai,
            storage,
            bucket: var_any(&["STORAGE_BUCKET"]).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            mock_upload_delay,
        })
    }
}

/// First non-empty value among `names`
fn var_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
