use crate::model::{Band, Frame, Summary};
use crate::render::svg::NO_DATA_MESSAGE;
use crate::utils::format_price;

/// Multi-line plain-text report of a frame, for the log.
pub fn render_report(region: &str, frame: &Frame) -> String {
    let Frame::Clock(clock) = frame else {
        return format!("[{}] {}", region, NO_DATA_MESSAGE);
    };
    let s = &clock.summary;
    let unit = clock.unit;

    let ring: String = clock
        .sectors
        .iter()
        .map(|sector| band_glyph(sector.band))
        .collect();

    let mut lines = vec![
        format!("[{}] Price now: {}", region, format_price(s.current_price, unit)),
        format!("[{}] Average: {}", region, format_price(s.average_price, unit)),
        format!("[{}] Cheapest: {}", region, extreme(s.min_hour, s.min_price, unit)),
        format!("[{}] Most expensive: {}", region, extreme(s.max_hour, s.max_price, unit)),
        format!("[{}] Suitable hours: {}", region, suitable(s)),
        format!("[{}] Ring 00-23: {}", region, ring),
    ];
    for legend in &clock.legend {
        lines.push(format!("[{}]   {} {}", region, band_glyph(legend.band), legend.text));
    }
    for line in s.advisory_text.lines() {
        lines.push(format!("[{}] 💡 {}", region, line));
    }
    lines.join("\n")
}

fn band_glyph(band: Band) -> char {
    match band {
        Band::Negative => '🔵',
        Band::VeryCheap => '🟩',
        Band::Cheap => '🟢',
        Band::Normal => '🟡',
        Band::Expensive => '🟠',
        Band::VeryExpensive => '🔴',
    }
}

fn extreme(hour: Option<u32>, price: Option<f64>, unit: &str) -> String {
    match (hour, price) {
        (Some(h), Some(p)) => format!("{:02}:00 ({})", h, format_price(p, unit)),
        _ => "-".to_string(),
    }
}

fn suitable(summary: &Summary) -> String {
    if summary.suitable_hours.is_empty() {
        return "none".to_string();
    }
    summary
        .suitable_hours
        .iter()
        .map(|h| format!("{:02}", h))
        .collect::<Vec<_>>()
        .join(", ")
}
