use crate::model::{Currency, HOURS_PER_DAY, PriceRecord};

/// Valid prices of a day in hour order. Missing hours are dropped, not zeroed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(prices: Vec<f64>) -> Self {
        let prices = prices
            .into_iter()
            .filter(|p| p.is_finite())
            .take(HOURS_PER_DAY)
            .collect();
        Self { prices }
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// An empty series is the "no data" state.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.prices.is_empty() {
            return None;
        }
        Some(self.prices.iter().sum::<f64>() / self.prices.len() as f64)
    }
}

/// Extracts the valid prices of the first 24 entries of `record`.
pub fn normalize(record: Option<&PriceRecord>, currency: Currency) -> PriceSeries {
    let Some(record) = record else {
        return PriceSeries::default();
    };
    let prices = record
        .entries
        .iter()
        .take(HOURS_PER_DAY)
        .filter_map(|entry| entry.price(currency))
        .collect();
    PriceSeries { prices }
}
