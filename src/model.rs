// Core structs: price records, bands, clock geometry, frames
use serde::{Deserialize, Deserializer, Serialize};

/// Number of hourly slots on the clock face.
pub const HOURS_PER_DAY: usize = 24;

/// Which price column of the API response is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Sek,
    Eur,
}

impl Currency {
    pub fn unit(&self) -> &'static str {
        match self {
            Currency::Sek => "kr/kWh",
            Currency::Eur => "€/kWh",
        }
    }
}

/// One hourly entry as delivered by the price API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(rename = "SEK_per_kWh", default, deserialize_with = "lenient_f64")]
    pub sek_per_kwh: Option<f64>,
    #[serde(rename = "EUR_per_kWh", default, deserialize_with = "lenient_f64")]
    pub eur_per_kwh: Option<f64>,
    #[serde(rename = "EXR", default, deserialize_with = "lenient_f64")]
    pub exr: Option<f64>,
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub time_end: Option<String>,
}

impl PriceEntry {
    /// Returns the price in the given currency if it is a finite number.
    pub fn price(&self, currency: Currency) -> Option<f64> {
        let value = match currency {
            Currency::Sek => self.sek_per_kwh,
            Currency::Eur => self.eur_per_kwh,
        };
        value.filter(|p| p.is_finite())
    }
}

/// Accepts any JSON value; only numbers become `Some`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// A day of hour-ordered price entries. The position in `entries` is the hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRecord {
    pub entries: Vec<PriceEntry>,
}

impl PriceRecord {
    pub fn new(entries: Vec<PriceEntry>) -> Self {
        Self { entries }
    }

    /// Builds a SEK record from optional hourly prices (`None` = missing hour).
    pub fn from_prices(prices: &[Option<f64>]) -> Self {
        let entries = prices
            .iter()
            .map(|p| PriceEntry {
                sek_per_kwh: *p,
                ..PriceEntry::default()
            })
            .collect();
        Self { entries }
    }

    /// Price for `hour`, or `None` when the hour is missing or not a number.
    pub fn slot(&self, hour: usize, currency: Currency) -> Option<f64> {
        if hour >= HOURS_PER_DAY {
            return None;
        }
        self.entries.get(hour).and_then(|e| e.price(currency))
    }
}

/// Severity band of an hourly price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    Negative,
    VeryCheap,
    Cheap,
    Normal,
    Expensive,
    VeryExpensive,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::Negative,
        Band::VeryCheap,
        Band::Cheap,
        Band::Normal,
        Band::Expensive,
        Band::VeryExpensive,
    ];

    pub fn color(&self) -> &'static str {
        match self {
            Band::Negative => "#0000ff",
            Band::VeryCheap => "#008800",
            Band::Cheap => "#00cc00",
            Band::Normal => "#ffff00",
            Band::Expensive => "#ff7700",
            Band::VeryExpensive => "#dd0000",
        }
    }

    /// Same spelling as the serialized form.
    pub fn token(&self) -> &'static str {
        match self {
            Band::Negative => "negative",
            Band::VeryCheap => "very-cheap",
            Band::Cheap => "cheap",
            Band::Normal => "normal",
            Band::Expensive => "expensive",
            Band::VeryExpensive => "very-expensive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Negative => "Negative price",
            Band::VeryCheap => "Very cheap",
            Band::Cheap => "Cheap",
            Band::Normal => "Normal",
            Band::Expensive => "Expensive",
            Band::VeryExpensive => "Very expensive",
        }
    }
}

/// Pixel position inside the clock square, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPosition {
    pub x: f64,
    pub y: f64,
}

/// One 15° slice of the ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    pub hour: u32,
    pub band: Band,
    pub color: &'static str,
    pub start_degrees: f64,
    pub end_degrees: f64,
    pub label: LabelPosition,
}

/// Current-hour marker on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    pub hour: u32,
    pub angle_degrees: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub band: Band,
    pub color: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub current_price: f64,
    pub average_price: f64,
    pub min_hour: Option<u32>,
    pub max_hour: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub suitable_hours: Vec<u32>,
    pub advisory_text: String,
}

/// Everything the renderer needs for one clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockFrame {
    pub sectors: Vec<Sector>,
    pub pointer: Pointer,
    pub summary: Summary,
    pub legend: Vec<LegendEntry>,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Frame {
    NoData { pointer: Pointer },
    Clock(ClockFrame),
}

impl Frame {
    pub fn pointer(&self) -> &Pointer {
        match self {
            Frame::NoData { pointer } => pointer,
            Frame::Clock(clock) => &clock.pointer,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Frame::NoData { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prices for {0} are not published yet")]
    NotPublished(String),

    #[error("invalid response status: {0}")]
    InvalidResponse(reqwest::StatusCode),

    #[error("failed to decode price data: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider responded [{0}]: {1}")]
    Api(reqwest::StatusCode, String),

    #[error("request timed out")]
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_with_non_numeric_price_is_absent() {
        let json = r#"[
            {"SEK_per_kWh": 0.5, "EUR_per_kWh": 0.04, "EXR": 11.2, "time_start": "2025-04-10T00:00:00+02:00"},
            {"SEK_per_kWh": "n/a"},
            {"SEK_per_kWh": null},
            {}
        ]"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.entries.len(), 4);
        assert_eq!(record.slot(0, Currency::Sek), Some(0.5));
        assert_eq!(record.slot(0, Currency::Eur), Some(0.04));
        assert_eq!(record.slot(1, Currency::Sek), None);
        assert_eq!(record.slot(2, Currency::Sek), None);
        assert_eq!(record.slot(3, Currency::Sek), None);
    }

    #[test]
    fn slot_beyond_last_hour_is_absent() {
        let record = PriceRecord::from_prices(&[Some(1.0); 30]);
        assert_eq!(record.slot(23, Currency::Sek), Some(1.0));
        assert_eq!(record.slot(24, Currency::Sek), None);
    }

    #[test]
    fn non_finite_price_is_absent() {
        let record = PriceRecord::from_prices(&[Some(f64::NAN), Some(f64::INFINITY)]);
        assert_eq!(record.slot(0, Currency::Sek), None);
        assert_eq!(record.slot(1, Currency::Sek), None);
    }

    #[test]
    fn band_serializes_kebab_case() {
        let json = serde_json::to_string(&Band::VeryExpensive).unwrap();
        assert_eq!(json, "\"very-expensive\"");
    }
}
