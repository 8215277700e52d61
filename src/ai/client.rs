use std::sync::Arc;

use tracing::{debug, error, info};

use super::parse::parse_json_response;
use super::prompts::{AD_SCORING_PROMPT, DOCUMENT_EXTRACTION_PROMPT};
use super::traits::{AiError, ContentPart, GenerativeModel};
use crate::models::{AnalysisResult, ExtractedData, UploadFile};

pub const DEFAULT_SCORING_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EXTRACTION_MODEL: &str = "gemini-2.0-flash";

/// Ad scoring and document extraction on top of a [`GenerativeModel`].
///
/// `score_ad` and `extract_document` never fail: any error is logged and
/// replaced by the documented fallback value. The `try_` variants expose the
/// error kind instead.
#[derive(Clone)]
pub struct AiClient {
    model: Arc<dyn GenerativeModel>,
    scoring_model: String,
    extraction_model: String,
}

impl AiClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            scoring_model: DEFAULT_SCORING_MODEL.to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
        }
    }

    pub fn with_models(mut self, scoring_model: &str, extraction_model: &str) -> Self {
        self.scoring_model = scoring_model.to_string();
        self.extraction_model = extraction_model.to_string();
        self
    }

    pub async fn try_score_ad(&self, content: &str) -> Result<AnalysisResult, AiError> {
        debug!(chars = content.len(), "scoring ad");
        let reply = self
            .model
            .generate(
                &self.scoring_model,
                vec![ContentPart::text(AD_SCORING_PROMPT), ContentPart::text(content)],
            )
            .await?;
        parse_json_response(&reply)
    }

    pub async fn score_ad(&self, content: &str) -> AnalysisResult {
        match self.try_score_ad(content).await {
            Ok(result) => {
                info!(score = result.urgency_score, "ad scored");
                result
            }
            Err(e) => {
                error!(error = %e, "Ad analysis failed, using fallback");
                AnalysisResult::fallback()
            }
        }
    }

    pub async fn try_extract_document(&self, file: &UploadFile) -> Result<ExtractedData, AiError> {
        debug!(name = %file.name, mime = %file.mime_type, bytes = file.size(), "extracting document");
        let reply = self
            .model
            .generate(
                &self.extraction_model,
                vec![
                    ContentPart::text(DOCUMENT_EXTRACTION_PROMPT),
                    ContentPart::InlineData {
                        mime_type: file.mime_type.clone(),
                        data: file.bytes.clone(),
                    },
                ],
            )
            .await?;
        parse_json_response(&reply)
    }

    pub async fn extract_document(&self, file: &UploadFile) -> ExtractedData {
        match self.try_extract_document(file).await {
            Ok(data) => {
                info!(name = %file.name, document_type = %data.document_type, "document extracted");
                data
            }
            Err(e) => {
                error!(name = %file.name, error = %e, "Document extraction failed, using fallback");
                ExtractedData::fallback()
            }
        }
    }
}
