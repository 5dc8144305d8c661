use crate::model::{FetchError, PriceRecord};
use chrono::NaiveDate;

/// Supplies the hourly prices of one calendar day for a market region.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_day(&self, date: NaiveDate, region: &str) -> Result<PriceRecord, FetchError>;
}
