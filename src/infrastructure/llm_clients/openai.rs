use super::{SentimentClient, SCORE_SYSTEM_PROMPT};
use crate::domain::classifier_config::ClassifierConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::sentiment::SentimentScore;
use crate::infrastructure::response::parse_sentiment_payload;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Client for OpenAI-compatible chat-completions endpoints
/// (local inference servers, OpenAI, OpenRouter).
pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn timeout(config: &ClassifierConfig) -> Duration {
        Duration::from_secs(config.timeout_secs.unwrap_or(120))
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentClient for OpenAIClient {
    async fn score(&self, config: &ClassifierConfig, text: &str) -> Result<SentimentScore> {
        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": SCORE_SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": text
                }
            ],
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
        });

        let mut request = self
            .client
            .post(&url)
            .timeout(Self::timeout(config))
            .json(&body);
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))?;

        parse_sentiment_payload(content)
    }

    async fn list_models(&self, config: &ClassifierConfig) -> Result<Vec<String>> {
        let url = format!("{}/models", config.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url).timeout(Self::timeout(config));
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        let models = json["data"]
            .as_array()
            .ok_or_else(|| {
                AppError::LLMError("Invalid response format: missing data array".to_string())
            })?
            .iter()
            .filter_map(|m| m["id"].as_str())
            .map(|id| id.to_string())
            .collect();

        Ok(models)
    }
}
