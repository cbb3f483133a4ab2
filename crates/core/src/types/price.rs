//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept as exact [`Decimal`] values so cart totals never drift;
//! rounding to cents only happens when a price is formatted for display.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a price or currency.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input has no digits once symbols and separators are removed.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// Prices must be zero or positive.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The currency code is not supported.
    #[error("unsupported currency code: {0}")]
    UnknownCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// The amount rounded to two decimal places, halves away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    CHF,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CHF => "CHF ",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::CHF => "CHF",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            "CHF" => Ok(Self::CHF),
            _ => Err(PriceError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Parse a displayed price such as `"$9,000.00"` into a decimal amount.
///
/// Currency symbols, a leading supported ISO code, whitespace and
/// thousands separators are stripped before parsing. Any other letters
/// make the text invalid.
///
/// # Errors
///
/// Returns an error if nothing numeric remains, the remainder is not a
/// decimal number, or the amount is negative.
///
/// # Examples
///
/// ```
/// use caseback_core::parse_price_text;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price_text("$9,000").unwrap(), Decimal::new(9000, 0));
/// assert_eq!(parse_price_text("CHF 12,500.50").unwrap(), Decimal::new(1_250_050, 2));
/// assert!(parse_price_text("call us").is_err());
/// ```
pub fn parse_price_text(text: &str) -> Result<Decimal, PriceError> {
    let trimmed = text.trim();
    let without_code = match (trimmed.get(..3), trimmed.get(3..)) {
        (Some(code), Some(rest)) if code.parse::<CurrencyCode>().is_ok() => rest,
        _ => trimmed,
    };
    let cleaned: String = without_code
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(PriceError::Empty);
    }

    let amount =
        Decimal::from_str(&cleaned).map_err(|_| PriceError::Invalid(text.trim().to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    Ok(amount)
}
