//! Display formatting for money and percentages.

/// Formats amounts with the configured currency symbol
#[derive(Debug, Clone)]
pub struct MoneyFormatter {
    currency_symbol: String,
}

impl MoneyFormatter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self { currency_symbol: currency_symbol.into() }
    }

    /// `£12.34`, `-£5.00`; non-finite values render as zero
    pub fn format_money(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}0.00", self.currency_symbol);
        }
        // Avoid "-£0.00" for tiny negative remainders
        let rounded = (amount * 100.0).round() / 100.0;
        if rounded < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, rounded.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, rounded.abs())
        }
    }
}

/// `0.125` -> `12.5%`; zero or non-finite ratios render as `0%`
pub fn format_percent(ratio: f64) -> String {
    if ratio == 0.0 || !ratio.is_finite() {
        return "0%".to_string();
    }
    format!("{:.1}%", ratio * 100.0)
}
