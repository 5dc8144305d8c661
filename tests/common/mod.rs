//! Shared fixtures for the integration tests: sample price days and
//! in-memory price/advisory collaborators.

#![allow(dead_code)]

use chrono::NaiveDate;
use elpris_clock::advisor::Advisor;
use elpris_clock::fetcher::PriceSource;
use elpris_clock::model::{AdvisoryError, FetchError, PriceRecord};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
}

/// A typical day: cheap night, morning and evening peaks, one negative hour.
pub fn sample_prices() -> Vec<Option<f64>> {
    vec![
        Some(0.12), Some(0.08), Some(0.05), Some(0.05), Some(0.07), Some(0.15),
        Some(0.45), Some(0.92), Some(1.10), Some(0.85), Some(0.40), Some(0.22),
        Some(0.10), Some(-0.01), Some(0.18), Some(0.35), Some(0.60), Some(1.25),
        Some(1.40), Some(1.05), Some(0.70), Some(0.38), Some(0.25), Some(0.20),
    ]
}

pub fn sample_record() -> PriceRecord {
    PriceRecord::from_prices(&sample_prices())
}

/// Same JSON shape as the price API.
pub fn sample_json() -> String {
    let entries: Vec<serde_json::Value> = sample_prices()
        .iter()
        .enumerate()
        .map(|(hour, price)| {
            serde_json::json!({
                "SEK_per_kWh": price,
                "EUR_per_kWh": price.map(|p| p / 11.0),
                "EXR": 11.0,
                "time_start": format!("2025-04-10T{:02}:00:00+02:00", hour),
                "time_end": format!("2025-04-10T{:02}:00:00+02:00", (hour + 1) % 24),
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

/// Serves queued results, one per call; an empty queue answers 404.
pub struct FakeSource {
    responses: Mutex<Vec<Result<PriceRecord, FetchError>>>,
    pub calls: Mutex<Vec<(NaiveDate, String)>>,
}

impl FakeSource {
    pub fn new(responses: Vec<Result<PriceRecord, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for FakeSource {
    async fn fetch_day(&self, date: NaiveDate, region: &str) -> Result<PriceRecord, FetchError> {
        self.calls.lock().unwrap().push((date, region.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FetchError::NotPublished(format!("{} {}", date, region))))
    }
}

/// Answers with a fixed text, optionally waiting for `release` first.
pub struct FakeAdvisor {
    pub answer: Option<String>,
    pub release: Option<std::sync::Arc<Notify>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeAdvisor {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            release: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(text: &str, release: std::sync::Arc<Notify>) -> Self {
        Self {
            answer: Some(text.to_string()),
            release: Some(release),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Advisor for FakeAdvisor {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn advise(&self, prompt: &str) -> Result<Option<String>, AdvisoryError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(release) = &self.release {
            release.notified().await;
        }
        Ok(self.answer.clone())
    }
}

/// Always fails.
pub struct FailingAdvisor;

#[async_trait::async_trait]
impl Advisor for FailingAdvisor {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn advise(&self, _prompt: &str) -> Result<Option<String>, AdvisoryError> {
        Err(AdvisoryError::Timeout)
    }
}
