//! Quota rendering
//!
//! Quota is an integer balance of usage credit. It is shown either as a
//! currency amount (`quota / quota_per_unit`) or as a compact number.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplayConfig;
use crate::i18n::{Localizer, Message};

const CURRENCY_SYMBOL: &str = "$";
const CURRENCY_DIGITS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaFormatter {
    quota_per_unit: i64,
    display_in_currency: bool,
}

impl QuotaFormatter {
    pub fn new(quota_per_unit: i64, display_in_currency: bool) -> Self {
        Self {
            quota_per_unit,
            display_in_currency,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.quota_per_unit, config.display_in_currency)
    }

    /// Renders a quota value the way the quota column and default names show it
    pub fn render(&self, quota: i64) -> String {
        if !self.display_in_currency || self.quota_per_unit <= 0 {
            return render_number(quota);
        }

        let amount = self.to_currency(quota);
        let rounded =
            amount.round_dp_with_strategy(CURRENCY_DIGITS, RoundingStrategy::MidpointAwayFromZero);

        // Positive amounts never render as zero
        if rounded.is_zero() && quota > 0 {
            let min_value = Decimal::new(1, CURRENCY_DIGITS);
            return format!("{}{:.2}", CURRENCY_SYMBOL, min_value);
        }

        format!("{}{:.2}", CURRENCY_SYMBOL, rounded)
    }

    /// Equivalent-amount hint shown under the quota input; empty without
    /// currency display
    pub fn render_with_prompt(&self, quota: i64, localizer: &dyn Localizer) -> String {
        if !self.display_in_currency {
            return String::new();
        }
        format!("{}{}", localizer.text(Message::EquivalentAmount), self.render(quota))
    }

    /// Exact currency value of a quota amount
    pub fn to_currency(&self, quota: i64) -> Decimal {
        if self.quota_per_unit <= 0 {
            return Decimal::ZERO;
        }
        Decimal::from(quota) / Decimal::from(self.quota_per_unit)
    }
}

impl Default for QuotaFormatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

/// Compact rendering: `1.5B`, `2.3M`, `12.3k`, plain below 10000
pub fn render_number(value: i64) -> String {
    let compact = |divisor: i64, suffix: &str| {
        let scaled = (Decimal::from(value) / Decimal::from(divisor))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.1}{}", scaled, suffix)
    };

    if value >= 1_000_000_000 {
        compact(1_000_000_000, "B")
    } else if value >= 1_000_000 {
        compact(1_000_000, "M")
    } else if value >= 10_000 {
        compact(1_000, "k")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_currency() {
        let formatter = QuotaFormatter::new(500_000, true);
        assert_eq!(formatter.render(500_000), "$1.00");
        assert_eq!(formatter.render(100_000), "$0.20");
        assert_eq!(formatter.render(250_000_000), "$500.00");
        assert_eq!(formatter.render(0), "$0.00");
    }

    #[test]
    fn test_render_tiny_positive_amount() {
        let formatter = QuotaFormatter::new(500_000, true);
        assert_eq!(formatter.render(1), "$0.01");
    }

    #[test]
    fn test_render_without_currency() {
        let formatter = QuotaFormatter::new(500_000, false);
        assert_eq!(formatter.render(9_999), "9999");
        assert_eq!(formatter.render(12_345), "12.3k");
        assert_eq!(formatter.render(2_500_000), "2.5M");
        assert_eq!(formatter.render(1_000_000_000), "1.0B");
    }

    #[test]
    fn test_to_currency() {
        let formatter = QuotaFormatter::new(500_000, true);
        assert_eq!(formatter.to_currency(750_000), dec!(1.5));
        assert_eq!(QuotaFormatter::new(0, true).to_currency(750_000), Decimal::ZERO);
    }

    #[test]
    fn test_prompt() {
        let catalog = Catalog::English;
        let formatter = QuotaFormatter::new(500_000, true);
        assert_eq!(formatter.render_with_prompt(5_000_000, &catalog), "Equivalent amount: $10.00");

        let raw = QuotaFormatter::new(500_000, false);
        assert_eq!(raw.render_with_prompt(5_000_000, &catalog), "");
    }
}
