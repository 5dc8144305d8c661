// Analyzer module: banding, radial layout and summary of a day's prices.

pub mod bands;
pub mod layout;
pub mod summary;

use crate::config::AppConfig;
use crate::model::{ClockFrame, Currency, Frame, PriceRecord};
use crate::state::Snapshot;
use bands::BandClassifier;
use chrono::NaiveDate;
use layout::RadialLayout;
use summary::SummaryComposer;

/// Trait defining the interface for the price clock analyzer.
pub trait Analyzer {
    /// Builds the immutable snapshot for a freshly fetched record.
    fn snapshot(&self, region: &str, date: NaiveDate, generation: u64, record: PriceRecord) -> Snapshot;
    /// Everything the renderer needs for `snapshot` at `now_hour`.
    fn build_frame(&self, snapshot: &Snapshot, now_hour: u32) -> Frame;
}

/// Implementation of the price clock analyzer. Holds only policy, no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerImpl {
    pub classifier: BandClassifier,
    pub layout: RadialLayout,
    pub composer: SummaryComposer,
    pub currency: Currency,
}

impl AnalyzerImpl {
    pub fn new(
        classifier: BandClassifier,
        layout: RadialLayout,
        composer: SummaryComposer,
        currency: Currency,
    ) -> Self {
        Self {
            classifier,
            layout,
            composer,
            currency,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            BandClassifier::new(config.band_multipliers),
            RadialLayout::new(config.geometry()),
            SummaryComposer::new(config.usage_window),
            config.currency,
        )
    }
}

impl Analyzer for AnalyzerImpl {
    fn snapshot(&self, region: &str, date: NaiveDate, generation: u64, record: PriceRecord) -> Snapshot {
        Snapshot::new(region, date, generation, self.currency, record, &self.classifier)
    }

    fn build_frame(&self, snapshot: &Snapshot, now_hour: u32) -> Frame {
        let pointer = self.layout.pointer(now_hour);

        let Some(bands) = snapshot.bands.as_ref() else {
            return Frame::NoData { pointer };
        };
        let Some(summary) = self.composer.compose(
            &snapshot.record,
            &snapshot.series,
            snapshot.currency,
            pointer.hour,
            snapshot.advisory.as_deref(),
        ) else {
            return Frame::NoData { pointer };
        };

        let unit = snapshot.currency.unit();
        Frame::Clock(ClockFrame {
            sectors: self.layout.sectors(&snapshot.record, bands, snapshot.currency),
            pointer,
            summary,
            legend: bands.legend(unit),
            unit,
        })
    }
}
