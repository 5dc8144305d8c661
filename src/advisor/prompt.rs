use crate::normalizer::PriceSeries;

pub const DEFAULT_INSTRUCTIONS: &str = "Which hours are most suitable for running household \
appliances such as the washing machine and tumble dryer, or for charging? If laundry has to be \
done between 06 and 21 anyway, which hours suit best? Give a professional summary. Reply with at \
most 4 lines of text, each at most 60 characters.";

pub const SYSTEM_ROLE: &str = "You are an energy expert.";

/// Prompt sent to the text-generation provider for one day's prices.
pub fn build_prompt(series: &PriceSeries, unit: &str, instructions: Option<&str>) -> String {
    let prices = series
        .prices()
        .iter()
        .map(|p| format!("{:.5}", p))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are an energy advisor. Analyse the following electricity prices per hour for hours 00-23, in {}: {}. {}",
        unit,
        prices,
        instructions.unwrap_or(DEFAULT_INSTRUCTIONS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_five_decimals() {
        let series = PriceSeries::new(vec![0.1, 1.234567, -0.02]);
        let prompt = build_prompt(&series, "kr/kWh", None);
        assert!(prompt.contains("in kr/kWh: 0.10000, 1.23457, -0.02000."));
        assert!(prompt.ends_with(DEFAULT_INSTRUCTIONS));
    }

    #[test]
    fn custom_instructions_replace_default() {
        let series = PriceSeries::new(vec![0.5]);
        let prompt = build_prompt(&series, "€/kWh", Some("Summarize in under 3 lines."));
        assert!(prompt.ends_with("0.50000. Summarize in under 3 lines."));
        assert!(!prompt.contains(DEFAULT_INSTRUCTIONS));
    }
}
