use crate::advisor::Advisor;
use crate::model::AdvisoryError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, if present.
    pub(crate) fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

pub struct GeminiAdvisor {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    request_timeout: Duration,
}

impl GeminiAdvisor {
    pub fn new(client: Client, api_key: String, model: String, request_timeout: Duration) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE.to_string(),
            api_key,
            model,
            request_timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait::async_trait]
impl Advisor for GeminiAdvisor {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn advise(&self, prompt: &str) -> Result<Option<String>, AdvisoryError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        info!("🧠 Requesting advisory from Gemini ({})", self.model);
        let response = match timeout(
            self.request_timeout,
            self.client
                .post(&url)
                .header("x-goog-api-key", self.api_key.as_str())
                .json(&body)
                .send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                let e = e.without_url();
                warn!("❌ Gemini send() failed: {:?}", e);
                return Err(AdvisoryError::Http(e));
            }
            Err(_) => {
                warn!("⏳ Gemini send() timed out");
                return Err(AdvisoryError::Timeout);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Gemini responded [{}]: {}", status, body);
            return Err(AdvisoryError::Api(status, body));
        }

        let result: GenerateResponse = response.json().await.map_err(|e| e.without_url())?;
        debug!("📥 Gemini response: {:?}", result);
        Ok(result.into_text())
    }
}
