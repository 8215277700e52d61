//! The "sniper" board: ad cards and on-demand AI scoring.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tracing::info;

use crate::ai::prompts::ad_content;
use crate::ai::AiClient;
use crate::models::{AnalysisResult, PropertyAd};
use crate::state::AppState;
use crate::store::{AdStore, AdUpdate};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("no ad with id {0}")]
    NotFound(String),
    #[error("analysis already running for ad {0}")]
    AlreadyRunning(String),
}

/// Heat of an urgency score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Hot,
    Medium,
    Cold,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => Self::Hot,
            50..=79 => Self::Medium,
            _ => Self::Cold,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hot => "🔥 chaud",
            Self::Medium => "tiède",
            Self::Cold => "froid",
        })
    }
}

/// Lower part of a card: either the trigger or the analysis result
#[derive(Debug, Clone, PartialEq)]
pub enum CardPanel {
    Trigger { enabled: bool, label: &'static str },
    Analysis {
        score: u8,
        band: ScoreBand,
        reasoning: String,
        sms: String,
    },
}

/// What one ad card shows
#[derive(Debug, Clone, PartialEq)]
pub struct AdCard {
    pub id: String,
    pub platform: String,
    pub title: String,
    pub price_label: String,
    pub location: String,
    pub description: String,
    pub image: Option<String>,
    pub panel: CardPanel,
}

impl AdCard {
    /// Render an ad given whether its analysis request is in flight
    pub fn view(ad: &PropertyAd, in_flight: bool) -> Self {
        let panel = match (&ad.analysis, ad.is_analyzed) {
            (Some(analysis), true) => CardPanel::Analysis {
                score: analysis.urgency_score,
                band: ScoreBand::of(analysis.urgency_score),
                reasoning: analysis.urgency_reasoning.clone(),
                sms: analysis.suggested_outreach.sms.clone(),
            },
            _ if in_flight => CardPanel::Trigger {
                enabled: false,
                label: "Analyse en cours...",
            },
            _ => CardPanel::Trigger {
                enabled: true,
                label: "Analyser avec IA",
            },
        };

        Self {
            id: ad.id.clone(),
            platform: ad.source_platform.clone(),
            title: ad.title.clone(),
            price_label: format_price_eur(ad.price),
            location: ad.location.clone(),
            description: ad.description.clone(),
            image: ad.images.first().cloned(),
            panel,
        }
    }
}

/// `280000` -> `280 000 €`
pub fn format_price_eur(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("{}{} €", sign, grouped)
}

/// Runs AI scoring for ads and writes the result back into the store.
#[derive(Clone)]
pub struct AdAnalyzer {
    ads: Arc<RwLock<AdStore>>,
    ai: Arc<AiClient>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl AdAnalyzer {
    pub fn new(ads: Arc<RwLock<AdStore>>, ai: Arc<AiClient>) -> Self {
        Self {
            ads,
            ai,
            in_flight: Arc::default(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.ads.clone(), state.ai.clone())
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(id)
    }

    /// Cards for every ad in the store, in store order
    pub async fn cards(&self) -> Vec<AdCard> {
        let store = self.ads.read().await;
        store
            .ads()
            .iter()
            .map(|ad| AdCard::view(ad, self.is_in_flight(&ad.id)))
            .collect()
    }

    /// Score the ad with this id and store the result, replacing any earlier analysis.
    ///
    /// A second call for the same id while the first is pending is rejected.
    pub async fn analyze(&self, id: &str) -> Result<AnalysisResult, AnalyzeError> {
        let content = {
            let store = self.ads.read().await;
            let ad = store
                .get(id)
                .ok_or_else(|| AnalyzeError::NotFound(id.to_string()))?;
            ad_content(&ad.title, ad.price, &ad.location, &ad.description, &ad.source_url)
        };

        let _guard = InFlightGuard::acquire(&self.in_flight, id)
            .ok_or_else(|| AnalyzeError::AlreadyRunning(id.to_string()))?;

        info!(id, "⚡ Analyzing ad");
        let result = self.ai.score_ad(&content).await;

        self.ads
            .write()
            .await
            .update_ad(id, AdUpdate::analyzed(result.clone()));

        Ok(result)
    }
}

/// Marks an id as in flight until dropped
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl InFlightGuard {
    fn acquire(set: &Arc<Mutex<HashSet<String>>>, id: &str) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.to_string());
        inserted.then(|| Self {
            set: set.clone(),
            id: id.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.id);
    }
}
