use crate::advisor::Advisor;
use crate::advisor::prompt::SYSTEM_ROLE;
use crate::model::AdvisoryError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// `choices[0].message.content`, if present.
    pub(crate) fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}

pub struct OpenAiAdvisor {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    request_timeout: Duration,
}

impl OpenAiAdvisor {
    pub fn new(client: Client, api_key: String, model: String, request_timeout: Duration) -> Self {
        Self {
            client,
            url: OPENAI_URL.to_string(),
            api_key,
            model,
            request_timeout,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

#[async_trait::async_trait]
impl Advisor for OpenAiAdvisor {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn advise(&self, prompt: &str) -> Result<Option<String>, AdvisoryError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_ROLE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
        };

        info!("🧠 Requesting advisory from OpenAI ({})", self.model);
        let response = match timeout(
            self.request_timeout,
            self.client
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                let e = e.without_url();
                warn!("❌ OpenAI send() failed: {:?}", e);
                return Err(AdvisoryError::Http(e));
            }
            Err(_) => {
                warn!("⏳ OpenAI send() timed out");
                return Err(AdvisoryError::Timeout);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ OpenAI responded [{}]: {}", status, body);
            return Err(AdvisoryError::Api(status, body));
        }

        let result: ChatResponse = response.json().await.map_err(|e| e.without_url())?;
        debug!("📥 OpenAI response: {:?}", result);
        Ok(result.into_text())
    }
}
