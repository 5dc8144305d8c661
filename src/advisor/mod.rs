// Advisory module: optional natural-language usage advice from a text-generation provider.

pub mod gemini;
pub mod openai;
pub mod prompt;

use crate::config::{AiProvider, AppConfig};
use crate::model::AdvisoryError;
use gemini::GeminiAdvisor;
use openai::OpenAiAdvisor;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Applied by the advisors around `send()`; the client itself has no timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a prompt into a short advisory text. `Ok(None)` means the provider
/// answered without usable text.
#[async_trait::async_trait]
pub trait Advisor: Send + Sync {
    fn name(&self) -> &'static str;
    async fn advise(&self, prompt: &str) -> Result<Option<String>, AdvisoryError>;
}

/// Builds the configured advisor. Advisory needs `use_ai`, a provider and a key;
/// anything less disables it.
pub fn from_config(config: &AppConfig) -> Result<Option<Arc<dyn Advisor>>, AdvisoryError> {
    if !config.use_ai {
        return Ok(None);
    }
    let (Some(provider), Some(api_key)) = (config.ai_provider, config.api_key.clone()) else {
        warn!("use_ai is set but ai_provider or api_key is missing; advisory disabled");
        return Ok(None);
    };
    if api_key.trim().is_empty() {
        warn!("api_key is empty; advisory disabled");
        return Ok(None);
    }

    let client = Client::builder().build()?;
    let advisor: Arc<dyn Advisor> = match provider {
        AiProvider::Gemini => Arc::new(GeminiAdvisor::new(
            client,
            api_key,
            config.gemini_model.clone(),
            REQUEST_TIMEOUT,
        )),
        AiProvider::OpenAi => Arc::new(OpenAiAdvisor::new(
            client,
            api_key,
            config.openai_model.clone(),
            REQUEST_TIMEOUT,
        )),
    };
    info!("Advisory enabled via {}", advisor.name());
    Ok(Some(advisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_use_ai() {
        let config = AppConfig {
            ai_provider: Some(AiProvider::Gemini),
            api_key: Some("k".into()),
            ..AppConfig::default()
        };
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn disabled_without_key() {
        let config = AppConfig {
            use_ai: true,
            ai_provider: Some(AiProvider::OpenAi),
            ..AppConfig::default()
        };
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn picks_configured_provider() {
        let config = AppConfig {
            use_ai: true,
            ai_provider: Some(AiProvider::OpenAi),
            api_key: Some("k".into()),
            ..AppConfig::default()
        };
        let advisor = from_config(&config).unwrap().unwrap();
        assert_eq!(advisor.name(), "openai");
    }
}
