//! Cleanup of model replies before they reach `serde_json`.
//!
//! Gemini often wraps JSON in markdown fences (```` ```json ... ``` ````)
//! even when asked not to.

use serde::de::DeserializeOwned;

use super::traits::AiError;

const FENCE: &str = "```";

/// Remove surrounding code fences, with or without a `json` tag.
///
/// Stripping is repeated until nothing changes, so applying it twice is the
/// same as applying it once.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let before = text;

        if let Some(rest) = text.strip_prefix(FENCE) {
            text = strip_language_tag(rest).trim_start();
        }
        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest.trim_end();
        }

        if text.len() == before.len() {
            return text;
        }
    }
}

fn strip_language_tag(after_fence: &str) -> &str {
    for tag in ["json", "JSON", "Json"] {
        if let Some(rest) = after_fence.strip_prefix(tag) {
            return rest;
        }
    }
    after_fence
}

/// Parse a model reply as `T`.
///
/// When the stripped text is not valid JSON, the outermost `{...}` slice is
/// tried before giving up, which covers replies like `Voici le JSON : {...}`.
pub fn parse_json_response<T: DeserializeOwned>(raw: &str) -> Result<T, AiError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let embedded = match (cleaned.find('{'), cleaned.rfind('}')) {
                (Some(start), Some(end)) if start < end => &cleaned[start..=end],
                _ => return Err(AiError::Parse(first_err.to_string())),
            };
            if embedded.len() == cleaned.len() {
                return Err(AiError::Parse(first_err.to_string()));
            }
            serde_json::from_str(embedded).map_err(|_| AiError::Parse(first_err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;
    use serde_json::Value;

    const BODY: &str = r#"{"urgencyScore": 85, "urgencyReasoning": "Divorce", "suggestedOutreach": {"sms": "Bonjour", "emailSubject": "Maison", "emailBody": "Madame"}}"#;

    #[test]
    fn fenced_and_plain_json_parse_to_the_same_value() {
        let plain: AnalysisResult = parse_json_response(BODY).unwrap();
        let tagged: AnalysisResult = parse_json_response(&format!("```json\n{}\n```", BODY)).unwrap();
        let untagged: AnalysisResult = parse_json_response(&format!("```\n{}\n```", BODY)).unwrap();

        assert_eq!(plain, tagged);
        assert_eq!(plain, untagged);
        assert_eq!(plain.urgency_score, 85);
    }

    #[test]
    fn stripping_is_idempotent() {
        let inputs = [
            format!("```json\n{}\n```", BODY),
            format!("  ```JSON{}```  ", BODY),
            format!("```\n```json\n{}\n```\n```", BODY),
            BODY.to_string(),
            "```".to_string(),
            String::new(),
        ];
        for input in &inputs {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(once), once, "input: {input:?}");
        }
        assert_eq!(strip_code_fences(&inputs[0]), BODY);
        assert_eq!(strip_code_fences(&inputs[2]), BODY);
    }

    #[test]
    fn only_an_opening_fence_is_still_stripped() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = parse_json_response::<AnalysisResult>("```json\n{\"urgencyScore\": \n```");
        assert!(matches!(result, Err(AiError::Parse(_))));

        let result = parse_json_response::<AnalysisResult>(r#"{"urgencyScore": 10}"#);
        assert!(matches!(result, Err(AiError::Parse(_))));
    }

    #[test]
    fn empty_reply_is_reported_as_empty() {
        let result = parse_json_response::<Value>("```json\n```");
        assert!(matches!(result, Err(AiError::EmptyResponse)));
    }

    #[test]
    fn json_embedded_in_prose_is_recovered() {
        let reply = format!("Voici l'analyse demandée : {} Bonne journée.", BODY);
        let parsed: AnalysisResult = parse_json_response(&reply).unwrap();
        assert_eq!(parsed.urgency_reasoning, "Divorce");
    }
}
