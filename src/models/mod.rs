use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod document;

pub use document::{DocumentType, ExtractedData, UploadFile};

/// Core property ad data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAd {
    pub id: String,
    pub source_url: String,
    /// Platform tag: "leboncoin", "seloger", "pap", ...
    pub source_platform: String,
    pub title: String,
    pub description: String,
    /// Asking price in euros
    pub price: i64,
    pub location: String,
    pub published_at: DateTime<Utc>,
    pub scraped_at: DateTime<Utc>,
    pub images: Vec<String>,
    pub is_analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}

/// Result of scoring an ad with the generative model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0-100, higher means a more motivated seller
    #[serde(deserialize_with = "deserialize_urgency_score")]
    pub urgency_score: u8,
    pub urgency_reasoning: String,
    pub suggested_outreach: SuggestedOutreach,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enriched_address: Option<EnrichedAddress>,
}

impl AnalysisResult {
    pub const FALLBACK_REASONING: &'static str = "Erreur lors de l'analyse IA.";

    /// Placeholder returned whenever scoring fails
    pub fn fallback() -> Self {
        Self {
            urgency_score: 0,
            urgency_reasoning: Self::FALLBACK_REASONING.to_string(),
            suggested_outreach: SuggestedOutreach::default(),
            enriched_address: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedOutreach {
    #[serde(default)]
    pub sms: String,
    #[serde(default)]
    pub email_subject: String,
    #[serde(default)]
    pub email_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    pub city: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The model sometimes answers 85.5 or 120; keep the score inside 0..=100.
fn deserialize_urgency_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Err(serde::de::Error::custom("urgency score is NaN"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_score_is_clamped_and_rounded() {
        let json = r#"{
            "urgencyScore": 142,
            "urgencyReasoning": "x",
            "suggestedOutreach": {"sms": "a", "emailSubject": "b", "emailBody": "c"}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.urgency_score, 100);

        let json = json.replace("142", "-3");
        let result: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.urgency_score, 0);

        let json = json.replace("-3", "72.6");
        let result: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.urgency_score, 73);
    }

    #[test]
    fn fallback_has_zero_score_and_fixed_reasoning() {
        let fallback = AnalysisResult::fallback();
        assert_eq!(fallback.urgency_score, 0);
        assert_eq!(fallback.urgency_reasoning, "Erreur lors de l'analyse IA.");
        assert!(fallback.enriched_address.is_none());
    }

    #[test]
    fn enriched_address_round_trips_in_camel_case() {
        let json = r#"{
            "urgencyScore": 80,
            "urgencyReasoning": "Vente rapide",
            "suggestedOutreach": {"sms": "Bonjour", "emailSubject": "Votre maison", "emailBody": "Madame, Monsieur"},
            "enrichedAddress": {"city": "Bordeaux", "postalCode": "33000", "coordinates": {"lat": 44.84, "lng": -0.58}}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let address = result.enriched_address.as_ref().unwrap();
        assert_eq!(address.postal_code, "33000");
        assert!(address.street.is_none());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["enrichedAddress"]["postalCode"], "33000");
        assert_eq!(value["suggestedOutreach"]["emailSubject"], "Votre maison");
    }
}
