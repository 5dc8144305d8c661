use crate::fetcher::traits::PriceSource;
use crate::model::{FetchError, PriceRecord};
use crate::utils::{date_path, hour_of};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

/// Day-ahead prices from the elprisetjustnu.se JSON API.
pub struct ElprisClient {
    client: Client,
    endpoint: String,
}

impl ElprisClient {
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("elpris-clock/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn build_url(&self, date: NaiveDate, region: &str) -> String {
        let base = if self.endpoint.ends_with('/') {
            self.endpoint.clone()
        } else {
            format!("{}/", self.endpoint)
        };
        format!("{}{}_{}.json", base, date_path(date), region.to_uppercase())
    }
}

#[async_trait::async_trait]
impl PriceSource for ElprisClient {
    async fn fetch_day(&self, date: NaiveDate, region: &str) -> Result<PriceRecord, FetchError> {
        let url = self.build_url(date, region);
        info!("🌐 Fetching prices from: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotPublished(format!("{} {}", date, region)));
        }
        if !status.is_success() {
            warn!("❌ Price API responded [{}]", status);
            return Err(FetchError::InvalidResponse(status));
        }

        let body = response.text().await?;
        let record: PriceRecord = serde_json::from_str(&body)?;
        info!("📬 Received {} price entries for {}", record.entries.len(), region);
        if let Some(hour) = first_misplaced_hour(&record) {
            warn!("Price entry at position {} does not start at hour {}", hour, hour);
        }
        Ok(record)
    }
}

/// Position of the first entry whose `time_start` hour differs from its index.
/// Entries without a timestamp are not checked.
pub fn first_misplaced_hour(record: &PriceRecord) -> Option<usize> {
    record
        .entries
        .iter()
        .take(crate::model::HOURS_PER_DAY)
        .enumerate()
        .find(|(index, entry)| {
            entry
                .time_start
                .as_deref()
                .and_then(hour_of)
                .is_some_and(|hour| hour as usize != *index)
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Currency;
    use crate::testing::serve_once;

    fn local_client(base: &str) -> ElprisClient {
        let client = Client::builder().no_proxy().build().unwrap();
        ElprisClient::with_client(client, base)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_decodes_day() {
        let (base, server) = serve_once(200, r#"[{"SEK_per_kWh":0.5},{"SEK_per_kWh":-0.02}]"#).await;
        let record = local_client(&base).fetch_day(date(), "se4").await.unwrap();
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.slot(1, Currency::Sek), Some(-0.02));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /2025/04-10_SE4.json HTTP/1.1"));
    }

    #[tokio::test]
    async fn missing_day_is_not_published() {
        let (base, server) = serve_once(404, "").await;
        let err = local_client(&base).fetch_day(date(), "SE4").await.unwrap_err();
        match err {
            FetchError::NotPublished(what) => assert_eq!(what, "2025-04-10 SE4"),
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn server_error_is_invalid_response() {
        let (base, server) = serve_once(500, "oops").await;
        let err = local_client(&base).fetch_day(date(), "SE4").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(StatusCode::INTERNAL_SERVER_ERROR)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unexpected_body_is_decode_error() {
        let (base, server) = serve_once(200, r#"{"prices": []}"#).await;
        let err = local_client(&base).fetch_day(date(), "SE4").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        server.await.unwrap();
    }

    #[test]
    fn builds_dated_region_url() {
        let client = ElprisClient::new("https://www.elprisetjustnu.se/api/v1/prices/").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        assert_eq!(
            client.build_url(date, "se4"),
            "https://www.elprisetjustnu.se/api/v1/prices/2025/04-09_SE4.json"
        );
    }

    #[test]
    fn detects_entries_out_of_hour_order() {
        let mut record: PriceRecord = serde_json::from_str(
            r#"[
                {"SEK_per_kWh": 0.1, "time_start": "2025-04-10T00:00:00+02:00"},
                {"SEK_per_kWh": 0.2, "time_start": "2025-04-10T01:00:00+02:00"},
                {"SEK_per_kWh": 0.3}
            ]"#,
        )
        .unwrap();
        assert_eq!(first_misplaced_hour(&record), None);
        record.entries[1].time_start = Some("2025-04-10T05:00:00+02:00".into());
        assert_eq!(first_misplaced_hour(&record), Some(1));
    }

    #[test]
    fn adds_missing_trailing_slash() {
        let client = ElprisClient::new("http://localhost:8080/prices").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(client.build_url(date, "SE3"), "http://localhost:8080/prices/2025/12-31_SE3.json");
    }
}
