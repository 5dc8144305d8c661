use crate::model::Currency;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_ENDPOINT: &str = "https://www.elprisetjustnu.se/api/v1/prices/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Gemini,
    OpenAi,
}

/// Inclusive price band for the "suitable hours" list.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsageWindow {
    pub lower: f64,
    pub upper: f64,
}

impl Default for UsageWindow {
    fn default() -> Self {
        Self {
            lower: 0.10,
            upper: 0.40,
        }
    }
}

impl UsageWindow {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower && price <= self.upper
    }
}

/// Standard deviation multipliers for the band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BandMultipliers {
    pub inner: f64,
    pub outer: f64,
}

impl Default for BandMultipliers {
    fn default() -> Self {
        Self {
            inner: 0.5,
            outer: 1.5,
        }
    }
}

/// Pixel dimensions of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockGeometry {
    pub clock_size: f64,
    pub ring_thickness: f64,
}

impl Default for ClockGeometry {
    fn default() -> Self {
        Self {
            clock_size: 300.0,
            ring_thickness: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_endpoint: String,
    pub regions: Vec<String>,
    pub currency: Currency,
    pub update_interval_seconds: u64,
    pub use_ai: bool,
    pub ai_provider: Option<AiProvider>,
    pub api_key: Option<String>,
    pub ai_prompt: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    pub clock_size: f64,
    pub ring_thickness: f64,
    pub usage_window: UsageWindow,
    pub band_multipliers: BandMultipliers,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let geometry = ClockGeometry::default();
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            regions: vec!["SE4".to_string()],
            currency: Currency::Sek,
            update_interval_seconds: 3600,
            use_ai: false,
            ai_provider: None,
            api_key: None,
            ai_prompt: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            clock_size: geometry.clock_size,
            ring_thickness: geometry.ring_thickness,
            usage_window: UsageWindow::default(),
            band_multipliers: BandMultipliers::default(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl AppConfig {
    pub fn geometry(&self) -> ClockGeometry {
        ClockGeometry {
            clock_size: self.clock_size,
            ring_thickness: self.ring_thickness,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() || self.regions.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid("at least one non-empty region is required".into()));
        }
        if self.update_interval_seconds == 0 {
            return Err(ConfigError::Invalid("update_interval_seconds must be positive".into()));
        }
        if !(self.clock_size > 0.0) || !(self.ring_thickness > 0.0) {
            return Err(ConfigError::Invalid("clock_size and ring_thickness must be positive".into()));
        }
        if self.ring_thickness * 2.0 >= self.clock_size {
            return Err(ConfigError::Invalid(format!(
                "ring_thickness {} does not fit a clock of size {}",
                self.ring_thickness, self.clock_size
            )));
        }
        if self.usage_window.lower > self.usage_window.upper {
            return Err(ConfigError::Invalid(format!(
                "usage_window lower {} is above upper {}",
                self.usage_window.lower, self.usage_window.upper
            )));
        }
        let m = self.band_multipliers;
        if !(m.inner >= 0.0) || !(m.outer >= m.inner) {
            return Err(ConfigError::Invalid(format!(
                "band_multipliers must satisfy 0 <= inner <= outer (got {} / {})",
                m.inner, m.outer
            )));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
