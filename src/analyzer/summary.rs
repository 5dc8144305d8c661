use crate::config::UsageWindow;
use crate::model::{Currency, HOURS_PER_DAY, PriceRecord, Summary};
use crate::normalizer::PriceSeries;

pub const NO_ADVISORY: &str = "No advisory available.";

/// Derives the facts shown next to the clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryComposer {
    window: UsageWindow,
}

impl SummaryComposer {
    pub fn new(window: UsageWindow) -> Self {
        Self { window }
    }

    /// `None` when the series is empty.
    pub fn compose(
        &self,
        record: &PriceRecord,
        series: &PriceSeries,
        currency: Currency,
        now_hour: u32,
        advisory: Option<&str>,
    ) -> Option<Summary> {
        let average_price = series.mean()?;
        let slots: Vec<Option<f64>> = (0..HOURS_PER_DAY).map(|h| record.slot(h, currency)).collect();

        let min_price = series.prices().iter().copied().reduce(f64::min);
        let max_price = series.prices().iter().copied().reduce(f64::max);

        let suitable_hours = slots
            .iter()
            .enumerate()
            .filter_map(|(hour, price)| match price {
                Some(p) if self.window.contains(*p) => Some(hour as u32),
                _ => None,
            })
            .collect();

        let current_price = slots
            .get(now_hour as usize)
            .copied()
            .flatten()
            .unwrap_or(0.0);

        let advisory_text = match advisory {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_ADVISORY.to_string(),
        };

        Some(Summary {
            current_price,
            average_price,
            min_hour: min_price.and_then(|m| first_hour_with(&slots, m)),
            max_hour: max_price.and_then(|m| first_hour_with(&slots, m)),
            min_price,
            max_price,
            suitable_hours,
            advisory_text,
        })
    }
}

/// Lowest hour whose price equals `value`.
fn first_hour_with(slots: &[Option<f64>], value: f64) -> Option<u32> {
    slots
        .iter()
        .position(|p| *p == Some(value))
        .map(|h| h as u32)
}
