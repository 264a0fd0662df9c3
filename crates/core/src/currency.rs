//! Currencies

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The set of currencies the backend will tag products and orders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    Usd,
    /// Euro
    Eur,
    /// Pound sterling
    Gbp,
    /// Egyptian pound
    Egp,
    /// Saudi riyal
    Sar,
    /// UAE dirham
    Aed,
    /// Japanese yen
    Jpy,
    /// Canadian dollar
    Cad,
    /// Australian dollar
    Aud,
}

impl Currency {
    /// Fallback currency reported for an empty cart.
    pub const DEFAULT: Self = Self::Egp;

    /// ISO-style code as the backend sends it.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Egp => "EGP",
            Self::Sar => "SAR",
            Self::Aed => "AED",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
        }
    }

    /// Display symbol used when formatting prices.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Egp => "E£",
            Self::Sar => "﷼",
            Self::Aed => "د.إ",
            Self::Jpy => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "EGP" => Ok(Self::Egp),
            "SAR" => Ok(Self::Sar),
            "AED" => Ok(Self::Aed),
            "JPY" => Ok(Self::Jpy),
            "CAD" => Ok(Self::Cad),
            "AUD" => Ok(Self::Aud),
            _ => Err(UnknownCurrency(value.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised currency code.
#[derive(Debug, Clone, Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// Currency descriptor as returned by `GET /products/currencies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code, e.g. `"EGP"`.
    pub code: String,

    /// Display symbol, e.g. `"E£"`.
    pub symbol: String,

    /// Whether the backend treats this currency as its default.
    #[serde(rename = "isDefault")]
    pub is_default: bool,
}

/// Formats an amount as `symbol` + comma-grouped value with two decimals.
#[must_use]
pub fn format_price(amount: Decimal, currency: Currency) -> String {
    format!("{}{}", currency.symbol(), group_thousands(amount))
}

fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
        None => (text, String::new()),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = integer.chars().collect();

    for (position, digit) in digits.iter().enumerate() {
        let remaining = digits.len() - position;

        if position > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(*digit);
    }

    let mut fraction = fraction;
    while fraction.len() < 2 {
        fraction.push('0');
    }

    let sign = if negative { "-" } else { "" };

    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn code_round_trips_through_from_str() -> TestResult {
        for currency in [
            Currency::Usd,
            Currency::Eur,
            Currency::Gbp,
            Currency::Egp,
            Currency::Sar,
            Currency::Aed,
            Currency::Jpy,
            Currency::Cad,
            Currency::Aud,
        ] {
            assert_eq!(currency.code().parse::<Currency>()?, currency);
        }

        Ok(())
    }

    #[test]
    fn unknown_code_is_rejected() {
        let result = "XYZ".parse::<Currency>();

        assert!(result.is_err(), "expected parse failure for XYZ");
    }

    #[test]
    fn serde_uses_uppercase_codes() -> TestResult {
        let json = serde_json::to_string(&Currency::Egp)?;

        assert_eq!(json, "\"EGP\"");
        assert_eq!(serde_json::from_str::<Currency>("\"AED\"")?, Currency::Aed);

        Ok(())
    }

    #[test]
    fn formats_with_symbol_and_two_decimals() {
        assert_eq!(format_price(dec!(50), Currency::Egp), "E£50.00");
        assert_eq!(format_price(dec!(3.5), Currency::Usd), "$3.50");
    }

    #[test]
    fn formats_with_thousands_grouping() {
        assert_eq!(format_price(dec!(1234567.891), Currency::Gbp), "£1,234,567.89");
        assert_eq!(format_price(dec!(1000), Currency::Jpy), "¥1,000.00");
    }
}
