//! Lenient coercion of untyped JSON values
//!
//! Commission configuration arrives as caller-edited JSON, often mid-edit.
//! These helpers never fail: anything that cannot be read as the requested
//! type degrades to a neutral default (zero, empty text, `false`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

use crate::error::CoreError;

/// Largest magnitude accepted from untyped input
///
/// Bounds each input on its own. Products of bounded inputs can still leave
/// the `Decimal` range, so arithmetic on them must saturate.
pub const MAX_MAGNITUDE: Decimal = dec!(1000000000000);

/// Clamps a value into `[-MAX_MAGNITUDE, MAX_MAGNITUDE]`, keeping its sign
pub fn bound_magnitude(value: Decimal) -> Decimal {
    value.clamp(-MAX_MAGNITUDE, MAX_MAGNITUDE)
}

/// Clamps a percentage into `[0, 100]`
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Coerces a JSON value to a decimal the way a numeric form field would
///
/// - numbers are taken as written
/// - strings are trimmed and parsed (plain or scientific notation); an empty
///   string is zero
/// - `true` is one and `false` is zero
/// - `null`, arrays, objects and unparsable or out-of-range text are zero
///
/// # Example
///
/// ```rust
/// use core_kernel::coerce_decimal;
/// use rust_decimal_macros::dec;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(&json!("12.5")), dec!(12.5));
/// assert_eq!(coerce_decimal(&json!("abc")), dec!(0));
/// assert_eq!(coerce_decimal(&json!(null)), dec!(0));
/// ```
pub fn coerce_decimal(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(trimmed)
            }
        }
        Value::Bool(true) => Some(Decimal::ONE),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    parsed.map(bound_magnitude).unwrap_or(Decimal::ZERO)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// Parses an amount strictly, for typed boundaries such as command-line flags
///
/// Unlike [`coerce_decimal`], blank or unparsable text is an error.
pub fn parse_amount(text: &str) -> Result<Decimal, CoreError> {
    let trimmed = text.trim();
    parse_decimal(trimmed)
        .map(bound_magnitude)
        .ok_or_else(|| CoreError::parse(format!("not a number: {:?}", trimmed)))
}

/// Returns the trimmed text of a string or number value, if non-blank
pub fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Coerces a JSON value to a boolean flag
///
/// Booleans are taken as-is, numbers are true when non-zero, and strings are
/// true when they read `true`, `yes` or `1`. Everything else is false.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(_) => !coerce_decimal(value).is_zero(),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    }
}
