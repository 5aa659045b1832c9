use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierProvider {
    Local,
    OpenAI,
    Gemini,
}

/// Connection settings for the external sentiment classifier
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::Local,
            base_url: "http://localhost:1234/v1".to_string(),
            model: "local-model".to_string(),
            api_key: None,
            max_tokens: Some(256),
            temperature: Some(0.0),
            timeout_secs: Some(120),
        }
    }
}

impl ClassifierConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base_url '{}': {}", self.base_url, e))?;
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err("temperature must be between 0.0 and 2.0".to_string());
            }
        }
        Ok(())
    }
}
