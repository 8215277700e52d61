use crate::models::PropertyAd;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all ad feeds
/// Real scrapers (leboncoin, seloger, pap) would plug in here; only the mock feed exists today
#[async_trait]
pub trait AdSource: Send + Sync {
    /// Fetch the current list of ads from the feed
    async fn fetch_ads(&self) -> Result<Vec<PropertyAd>>;

    /// Get the name of the feed
    fn source_name(&self) -> &'static str;
}
