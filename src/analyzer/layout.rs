use crate::analyzer::bands::Bands;
use crate::config::ClockGeometry;
use crate::model::{Currency, HOURS_PER_DAY, LabelPosition, Pointer, PriceRecord, Sector};

pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Distance between the inner edge of the ring and the hour numbers.
const LABEL_INSET: f64 = 20.0;

/// Maps hours to ring sectors, hour labels and the current-hour pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialLayout {
    geometry: ClockGeometry,
}

impl RadialLayout {
    pub fn new(geometry: ClockGeometry) -> Self {
        Self { geometry }
    }

    fn center(&self) -> f64 {
        self.geometry.clock_size / 2.0
    }

    fn label_radius(&self) -> f64 {
        self.center() - self.geometry.ring_thickness - LABEL_INSET
    }

    fn pointer_radius(&self) -> f64 {
        self.center() - self.geometry.ring_thickness / 2.0
    }

    /// 24 sectors in hour order. A missing hour is colored as price 0 but is
    /// not part of the statistics behind `bands`.
    pub fn sectors(&self, record: &PriceRecord, bands: &Bands, currency: Currency) -> Vec<Sector> {
        (0..HOURS_PER_DAY)
            .map(|hour| {
                let price = record.slot(hour, currency).unwrap_or(0.0);
                let band = bands.classify(price);
                let start = hour as f64 * DEGREES_PER_HOUR;
                Sector {
                    hour: hour as u32,
                    band,
                    color: band.color(),
                    start_degrees: start,
                    end_degrees: start + DEGREES_PER_HOUR,
                    label: self.label_position(hour as u32),
                }
            })
            .collect()
    }

    /// Hour number position, measured clockwise from 12 o'clock.
    pub fn label_position(&self, hour: u32) -> LabelPosition {
        let theta = (hour as f64 * DEGREES_PER_HOUR).to_radians();
        let r = self.label_radius();
        LabelPosition {
            x: self.center() + r * theta.sin(),
            y: self.center() - r * theta.cos(),
        }
    }

    /// Marker for `hour`. The angle is relative to 3 o'clock, so hour 0 is -90°.
    pub fn pointer(&self, hour: u32) -> Pointer {
        let hour = hour % HOURS_PER_DAY as u32;
        let angle = hour as f64 * DEGREES_PER_HOUR - 90.0;
        let rad = angle.to_radians();
        let r = self.pointer_radius();
        Pointer {
            hour,
            angle_degrees: angle,
            x: self.center() + r * rad.cos(),
            y: self.center() + r * rad.sin(),
        }
    }
}
