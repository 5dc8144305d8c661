// Utility functions
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};

/// `YYYY/MM-DD` path segment used by the price API.
pub fn date_path(date: NaiveDate) -> String {
    format!("{}/{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses an RFC 3339 timestamp keeping its offset.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(date_str).ok()
}

/// Local hour of an RFC 3339 timestamp, e.g. an entry's `time_start`.
pub fn hour_of(date_str: &str) -> Option<u32> {
    parse_datetime(date_str).map(|dt| dt.hour())
}

/// Two-decimal price with unit, e.g. `0.42 kr/kWh`.
pub fn format_price(price: f64, unit: &str) -> String {
    format!("{:.2} {}", price, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_path_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(date_path(date), "2025/01-05");
    }

    #[test]
    fn hour_of_reads_local_offset() {
        assert_eq!(hour_of("2025-04-10T13:00:00+02:00"), Some(13));
        assert_eq!(hour_of("not a date"), None);
    }

    #[test]
    fn format_price_rounds() {
        assert_eq!(format_price(0.4249, "kr/kWh"), "0.42 kr/kWh");
        assert_eq!(format_price(-0.126, "kr/kWh"), "-0.13 kr/kWh");
    }
}
