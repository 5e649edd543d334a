//! Core Kernel - Foundational types for the commission allocation system
//!
//! This crate provides the building blocks shared by the engine and its callers:
//! - Money types with precise decimal arithmetic and currency rounding
//! - Lenient coercion of untyped JSON values into decimals, text and flags
//! - String-backed identifiers for commission lines and deals

pub mod money;
pub mod coerce;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, CurrencyFormat, MoneyError, Rate, round_currency, CURRENCY_PRECISION};
pub use coerce::{coerce_decimal, coerce_flag, coerce_text, parse_amount, bound_magnitude, clamp_percent, MAX_MAGNITUDE};
pub use identifiers::{LineId, DealId};
pub use error::CoreError;
