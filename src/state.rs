// Immutable per-refresh snapshot and the cell that swaps it
use crate::analyzer::bands::{BandClassifier, Bands};
use crate::model::{Currency, PriceRecord};
use crate::normalizer::{PriceSeries, normalize};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Prices, derived bands and advisory of one refresh. Never mutated after
/// construction; a new advisory produces a new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub region: String,
    pub date: Option<NaiveDate>,
    pub generation: u64,
    pub currency: Currency,
    pub record: PriceRecord,
    pub series: PriceSeries,
    pub bands: Option<Bands>,
    pub advisory: Option<String>,
}

impl Snapshot {
    /// Placeholder before the first successful fetch.
    pub fn empty(region: &str, currency: Currency) -> Self {
        Self {
            region: region.to_string(),
            date: None,
            generation: 0,
            currency,
            record: PriceRecord::default(),
            series: PriceSeries::default(),
            bands: None,
            advisory: None,
        }
    }

    pub fn new(
        region: &str,
        date: NaiveDate,
        generation: u64,
        currency: Currency,
        record: PriceRecord,
        classifier: &BandClassifier,
    ) -> Self {
        let series = normalize(Some(&record), currency);
        let bands = classifier.compute(&series);
        Self {
            region: region.to_string(),
            date: Some(date),
            generation,
            currency,
            record,
            series,
            bands,
            advisory: None,
        }
    }

    pub fn with_advisory(&self, advisory: Option<String>) -> Self {
        Self {
            advisory,
            ..self.clone()
        }
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }
}

/// Holds the current snapshot of one region. Writers replace it whole.
#[derive(Debug)]
pub struct SnapshotCell {
    inner: RwLock<Arc<Snapshot>>,
}

impl SnapshotCell {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub async fn load(&self) -> Arc<Snapshot> {
        self.inner.read().await.clone()
    }

    pub async fn store(&self, snapshot: Snapshot) {
        *self.inner.write().await = Arc::new(snapshot);
    }

    /// Attaches an advisory if the snapshot is still the one from `generation`.
    /// Returns `false` when a newer refresh already replaced it.
    pub async fn store_advisory(&self, generation: u64, advisory: String) -> bool {
        let mut guard = self.inner.write().await;
        if guard.generation != generation {
            return false;
        }
        *guard = Arc::new(guard.with_advisory(Some(advisory)));
        true
    }
}
