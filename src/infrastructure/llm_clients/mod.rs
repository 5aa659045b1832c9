pub mod gemini;
pub mod openai;

use crate::domain::classifier_config::{ClassifierConfig, ClassifierProvider};
use crate::domain::error::Result;
use crate::domain::sentiment::SentimentScore;
use async_trait::async_trait;
use gemini::GeminiClient;
use openai::OpenAIClient;

/// System prompt instructing the model to return a bare JSON score
pub(crate) const SCORE_SYSTEM_PROMPT: &str = "You are a sentiment scoring engine. \
Score the text the user sends and respond with ONLY a JSON object of the form \
{\"polarity\": <number between -1 and 1>, \"subjectivity\": <number between 0 and 1>, \
\"entities\": [<named entities found in the text, as strings>]}. \
Do not include any explanations, notes, or markdown fences around the output.";

#[async_trait]
pub trait SentimentClient {
    async fn score(&self, config: &ClassifierConfig, text: &str) -> Result<SentimentScore>;
    async fn list_models(&self, config: &ClassifierConfig) -> Result<Vec<String>>;
}

pub struct RouterClient {
    openai: OpenAIClient,
    gemini: GeminiClient,
}

impl RouterClient {
    pub fn new() -> Self {
        Self {
            openai: OpenAIClient::new(),
            gemini: GeminiClient::new(),
        }
    }
}

impl Default for RouterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentClient for RouterClient {
    async fn score(&self, config: &ClassifierConfig, text: &str) -> Result<SentimentScore> {
        match config.provider {
            ClassifierProvider::Gemini => self.gemini.score(config, text).await,
            _ => self.openai.score(config, text).await,
        }
    }

    async fn list_models(&self, config: &ClassifierConfig) -> Result<Vec<String>> {
        match config.provider {
            ClassifierProvider::Gemini => self.gemini.list_models(config).await,
            _ => self.openai.list_models(config).await,
        }
    }
}
