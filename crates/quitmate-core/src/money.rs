//! Currency tagging and display formatting for cent amounts.
//!
//! All monetary amounts in the crate are integer minor units (cents);
//! floats only appear in the per-second accrual rate.

use serde::{Deserialize, Serialize};

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Mxn,
}

impl Currency {
    /// Compact symbol for UI controls and CLI output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "\u{20ac}",
            Currency::Usd => "$",
            Currency::Gbp => "\u{a3}",
            Currency::Mxn => "$",
        }
    }

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Mxn => "MXN",
        }
    }
}

/// Format a cent amount as `"12.34 €"` style text.
pub fn format_cents(cents: i64, currency: Currency) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{}{}.{:02} {}",
        sign,
        abs / 100,
        abs % 100,
        currency.symbol()
    )
}
