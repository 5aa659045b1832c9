use crate::domain::error::{AppError, Result};
use crate::domain::sentiment::SentimentScore;

/// Parse a classifier reply into a sentiment score.
/// Accepts bare JSON, fenced JSON, or a whole chat-completion envelope;
/// polarity/subjectivity may arrive as numbers or numeric strings.
pub fn parse_sentiment_payload(output: &str) -> Result<SentimentScore> {
    let payload = extract_json_payload(output);

    let value: serde_json::Value = serde_json::from_str(&payload)
        .map_err(|e| AppError::LLMError(format!("Failed to parse score JSON: {}", e)))?;

    let polarity = numeric_field(&value, "polarity")?;
    let subjectivity = numeric_field(&value, "subjectivity")?;

    let entities = value
        .get("entities")
        .and_then(|e| e.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    Ok(SentimentScore {
        polarity,
        subjectivity,
        entities,
    }
    .clamped())
}

fn numeric_field(value: &serde_json::Value, key: &str) -> Result<f64> {
    let field = value
        .get(key)
        .ok_or_else(|| AppError::LLMError(format!("Score JSON missing '{}'", key)))?;

    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .ok_or_else(|| AppError::LLMError(format!("Score JSON field '{}' is not numeric", key)))
}

pub(crate) fn extract_json_payload(output: &str) -> String {
    let trimmed = output.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(content) = value
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
        {
            return strip_code_fence(content);
        }
        return trimmed.to_string();
    }
    strip_code_fence(trimmed)
}

fn strip_code_fence(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_json() {
        let score =
            parse_sentiment_payload(r#"{"polarity": 0.5, "subjectivity": 0.8, "entities": ["NYC"]}"#)
                .unwrap();

        assert_eq!(score.polarity, 0.5);
        assert_eq!(score.subjectivity, 0.8);
        assert_eq!(score.entities, vec!["NYC".to_string()]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let output = "```json\n{\"polarity\": -0.3, \"subjectivity\": 0.2}\n```";
        let score = parse_sentiment_payload(output).unwrap();

        assert_eq!(score.polarity, -0.3);
        assert!(score.entities.is_empty());
    }

    #[test]
    fn test_parse_chat_envelope() {
        let output = r#"{"choices": [{"message": {"content": "{\"polarity\": 0.2, \"subjectivity\": 0.9, \"entities\": []}"}}]}"#;
        let score = parse_sentiment_payload(output).unwrap();

        assert_eq!(score.polarity, 0.2);
        assert_eq!(score.subjectivity, 0.9);
    }

    #[test]
    fn test_parse_numeric_strings() {
        let score =
            parse_sentiment_payload(r#"{"polarity": "0.4", "subjectivity": "0.1"}"#).unwrap();

        assert_eq!(score.polarity, 0.4);
        assert_eq!(score.subjectivity, 0.1);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let score =
            parse_sentiment_payload(r#"{"polarity": 3.0, "subjectivity": 1.5}"#).unwrap();

        assert_eq!(score.polarity, 1.0);
        assert_eq!(score.subjectivity, 1.0);
    }

    #[test]
    fn test_missing_field_is_error() {
        assert!(parse_sentiment_payload(r#"{"polarity": 0.5}"#).is_err());
        assert!(parse_sentiment_payload("not json at all").is_err());
    }

    #[test]
    fn test_non_string_entities_skipped() {
        let score = parse_sentiment_payload(
            r#"{"polarity": 0, "subjectivity": 0, "entities": ["Paris", 42, null]}"#,
        )
        .unwrap();

        assert_eq!(score.entities, vec!["Paris".to_string()]);
    }
}
