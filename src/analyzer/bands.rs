use crate::config::BandMultipliers;
use crate::model::{Band, LegendEntry};
use crate::normalizer::PriceSeries;

/// Thresholds derived from one day's prices. Built once per refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub mean: f64,
    pub std_dev: f64,
    pub very_cheap: f64,
    pub cheap: f64,
    pub expensive: f64,
    pub very_expensive: f64,
}

impl Bands {
    /// Ordered rule, first match wins. Boundary operators are part of the contract:
    /// a price equal to `very_cheap` or `cheap` lands in that band, a price equal
    /// to `expensive` or `very_expensive` lands in the band above.
    pub fn classify(&self, price: f64) -> Band {
        if price < 0.0 {
            Band::Negative
        } else if price <= self.very_cheap {
            Band::VeryCheap
        } else if price <= self.cheap {
            Band::Cheap
        } else if price < self.expensive {
            Band::Normal
        } else if price < self.very_expensive {
            Band::Expensive
        } else {
            Band::VeryExpensive
        }
    }

    /// Legend rows in band order, thresholds with two decimals.
    pub fn legend(&self, unit: &str) -> Vec<LegendEntry> {
        Band::ALL
            .iter()
            .map(|band| {
                let text = match band {
                    Band::Negative => format!("{} (< 0 {})", band.label(), unit),
                    Band::VeryCheap => format!("{} (< {:.2} {})", band.label(), self.very_cheap, unit),
                    Band::Cheap => format!("{} (< {:.2} {})", band.label(), self.cheap, unit),
                    Band::Normal => format!("{} (< {:.2} {})", band.label(), self.expensive, unit),
                    Band::Expensive => format!("{} (< {:.2} {})", band.label(), self.very_expensive, unit),
                    Band::VeryExpensive => {
                        format!("{} (≥ {:.2} {})", band.label(), self.very_expensive, unit)
                    }
                };
                LegendEntry {
                    band: *band,
                    color: band.color(),
                    text,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BandClassifier {
    multipliers: BandMultipliers,
}

impl BandClassifier {
    pub fn new(multipliers: BandMultipliers) -> Self {
        Self { multipliers }
    }

    /// Mean and population standard deviation of the series, then the four
    /// thresholds. `None` for an empty series.
    pub fn compute(&self, series: &PriceSeries) -> Option<Bands> {
        let prices = series.prices();
        let avg = series.mean()?;
        let count = prices.len() as f64;
        let std_dev = (prices.iter().map(|p| (p - avg).powi(2)).sum::<f64>() / count).sqrt();

        let BandMultipliers { inner, outer } = self.multipliers;
        Some(Bands {
            mean: avg,
            std_dev,
            very_cheap: avg - outer * std_dev,
            cheap: avg - inner * std_dev,
            expensive: avg + inner * std_dev,
            very_expensive: avg + outer * std_dev,
        })
    }
}
