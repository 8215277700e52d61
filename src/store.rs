//! In-memory ad collection shared by the sniper board.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{AnalysisResult, PropertyAd};

/// Partial update for a [`PropertyAd`]; `None` leaves a field as it is.
/// `analysis: Some(None)` clears a stored analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdUpdate {
    pub source_url: Option<String>,
    pub source_platform: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub location: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub images: Option<Vec<String>>,
    pub is_analyzed: Option<bool>,
    pub analysis: Option<Option<AnalysisResult>>,
}

impl AdUpdate {
    /// Attach a fresh analysis and mark the ad as analyzed
    pub fn analyzed(analysis: AnalysisResult) -> Self {
        Self {
            is_analyzed: Some(true),
            analysis: Some(Some(analysis)),
            ..Default::default()
        }
    }

    /// Drop the analysis and mark the ad as not analyzed
    pub fn cleared() -> Self {
        Self {
            is_analyzed: Some(false),
            analysis: Some(None),
            ..Default::default()
        }
    }

    fn apply(self, ad: &mut PropertyAd) {
        if let Some(v) = self.source_url {
            ad.source_url = v;
        }
        if let Some(v) = self.source_platform {
            ad.source_platform = v;
        }
        if let Some(v) = self.title {
            ad.title = v;
        }
        if let Some(v) = self.description {
            ad.description = v;
        }
        if let Some(v) = self.price {
            ad.price = v;
        }
        if let Some(v) = self.location {
            ad.location = v;
        }
        if let Some(v) = self.published_at {
            ad.published_at = v;
        }
        if let Some(v) = self.scraped_at {
            ad.scraped_at = v;
        }
        if let Some(v) = self.images {
            ad.images = v;
        }
        if let Some(v) = self.is_analyzed {
            ad.is_analyzed = v;
        }
        if let Some(v) = self.analysis {
            ad.analysis = v;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdStore {
    ads: Vec<PropertyAd>,
    pub is_loading: bool,
}

impl AdStore {
    pub fn new(ads: Vec<PropertyAd>) -> Self {
        Self {
            ads,
            is_loading: false,
        }
    }

    pub fn set_ads(&mut self, ads: Vec<PropertyAd>) {
        debug!(count = ads.len(), "replacing ad collection");
        self.ads = ads;
    }

    /// Merge `update` into the ad with this id. Returns false when no ad matched.
    pub fn update_ad(&mut self, id: &str, update: AdUpdate) -> bool {
        match self.ads.iter_mut().find(|ad| ad.id == id) {
            Some(ad) => {
                update.apply(ad);
                true
            }
            None => {
                debug!(id, "update for unknown ad ignored");
                false
            }
        }
    }

    pub fn ads(&self) -> &[PropertyAd] {
        &self.ads
    }

    pub fn get(&self, id: &str) -> Option<&PropertyAd> {
        self.ads.iter().find(|ad| ad.id == id)
    }

    pub fn len(&self) -> usize {
        self.ads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }
}
