//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Commission amounts are rounded half away from zero at currency precision.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal places used for every displayed or summed commission amount
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds a value to currency precision, half away from zero
///
/// # Example
///
/// ```rust
/// use core_kernel::round_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
/// assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    CAD,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => CURRENCY_PRECISION,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
            Currency::CAD => "C$",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "JPY" => Ok(Currency::JPY),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// How a money amount is rendered for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyFormat {
    /// `€ 1234.56`
    #[default]
    Symbol,
    /// `1234.56 EUR`
    Code,
    /// `1 234,56 €` with French digit grouping
    French,
}

/// A monetary amount with associated currency
///
/// Amounts are stored with 4 decimal places internally; rounding to the
/// currency's precision happens explicitly via [`Money::round_to_currency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Rounds to the currency's standard decimal places, half away from zero
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Renders the amount rounded to currency precision in the given style
    pub fn format(&self, style: CurrencyFormat) -> String {
        let rounded = self.round_to_currency();
        let dp = self.currency.decimal_places() as usize;
        let sign = if rounded.amount.is_sign_negative() && !rounded.amount.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.dp$}", rounded.amount.abs(), dp = dp);

        match style {
            CurrencyFormat::Symbol => format!("{}{} {}", sign, self.currency.symbol(), digits),
            CurrencyFormat::Code => format!("{}{} {}", sign, digits, self.currency.code()),
            CurrencyFormat::French => {
                let (integer, fraction) = match digits.split_once('.') {
                    Some((integer, fraction)) => (integer, Some(fraction)),
                    None => (digits.as_str(), None),
                };
                let mut out = String::from(sign);
                out.push_str(&group_digits(integer, '\u{202f}'));
                if let Some(fraction) = fraction {
                    out.push(',');
                    out.push_str(fraction);
                }
                out.push('\u{a0}');
                out.push_str(self.currency.symbol());
                out
            }
        }
    }
}

fn group_digits(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(CurrencyFormat::Symbol))
    }
}

/// A percentage rate applied to a monetary base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from percentage points (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Applies this rate to a bare amount, without rounding
    ///
    /// The product saturates at [`Decimal::MAX`] / [`Decimal::MIN`].
    pub fn of(&self, base: Decimal) -> Decimal {
        base.saturating_mul(self.value)
    }
}
