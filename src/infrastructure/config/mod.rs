use crate::domain::classifier_config::ClassifierConfig;
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Service-wide configuration, merged from defaults, an optional
/// `sentiscope.toml`, and `SENTISCOPE_`-prefixed environment variables
/// (nested fields split on `__`, e.g. `SENTISCOPE_CLASSIFIER__API_KEY`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub classifier: ClassifierConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load() -> Result<Self> {
        let config: ServiceConfig = Figment::from(Serialized::defaults(ServiceConfig::default()))
            .merge(Toml::file("sentiscope.toml"))
            .merge(Env::prefixed("SENTISCOPE_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        config
            .classifier
            .validate()
            .map_err(AppError::ConfigError)?;

        Ok(config)
    }
}
