//! Stored commission configuration
//!
//! A deal's configuration is kept as JSON in a single CRM custom field. Two
//! shapes exist in the wild:
//!
//! - **Combined** (current): `{"commissionConfig": [...], "depositPercent": n, "dealValue": n}`
//! - **Legacy**: the bare line array `[...]`
//!
//! Either may arrive already parsed or still serialized as a JSON string.
//! Decoding is lenient by default; [`StoredCommission::parse_str`] is the
//! strict variant for callers that want to reject garbage.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

use core_kernel::coerce_decimal;

use crate::error::CommissionError;
use crate::line::{sanitize, CommissionLineConfig};

const CONFIG_KEY: &str = "commissionConfig";
const DEPOSIT_PERCENT_KEY: &str = "depositPercent";
const DEAL_VALUE_KEY: &str = "dealValue";

/// The shape a stored configuration was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredFormat {
    /// Object carrying lines, deposit percent and deal value
    Combined,
    /// Bare array of lines
    Legacy,
    /// Nothing usable was stored
    Empty,
}

/// A decoded stored configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCommission {
    /// Sanitized lines
    pub commission_config: Vec<CommissionLineConfig>,
    /// Deposit percentage saved alongside the lines, if any
    pub deposit_percent: Option<Decimal>,
    /// Deal value at the time of saving, if any
    pub deal_value: Option<Decimal>,
    /// The shape the data was decoded from
    pub format: StoredFormat,
}

impl StoredCommission {
    /// Builds a combined-shape record from typed parts
    pub fn new(
        commission_config: Vec<CommissionLineConfig>,
        deposit_percent: Decimal,
        deal_value: Decimal,
    ) -> Self {
        Self {
            commission_config,
            deposit_percent: Some(deposit_percent),
            deal_value: Some(deal_value),
            format: StoredFormat::Combined,
        }
    }

    /// A record with nothing stored
    pub fn empty() -> Self {
        Self {
            commission_config: Vec::new(),
            deposit_percent: None,
            deal_value: None,
            format: StoredFormat::Empty,
        }
    }

    /// Decodes any stored value, degrading to [`StoredCommission::empty`]
    pub fn decode(raw: &Value) -> Self {
        match raw {
            Value::String(text) => Self::from_json_str(text),
            other => Self::decode_parsed(other).unwrap_or_else(|| {
                tracing::warn!(kind = value_kind(other), "Ignoring unrecognised stored commission configuration");
                Self::empty()
            }),
        }
    }

    /// Decodes a serialized stored value, degrading to [`StoredCommission::empty`]
    pub fn from_json_str(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::empty();
        }

        match Self::parse_str(text) {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(%error, "Ignoring malformed stored commission configuration");
                Self::empty()
            }
        }
    }

    /// Strictly parses a serialized stored value
    ///
    /// # Errors
    ///
    /// Returns [`CommissionError::MalformedStoredConfig`] when the text is not
    /// JSON or is neither of the known shapes.
    pub fn parse_str(text: &str) -> Result<Self, CommissionError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CommissionError::MalformedStoredConfig(e.to_string()))?;

        Self::decode_parsed(&value).ok_or_else(|| {
            CommissionError::MalformedStoredConfig(format!(
                "expected a line array or an object with \"{}\", got {}",
                CONFIG_KEY,
                value_kind(&value)
            ))
        })
    }

    fn decode_parsed(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::empty()),
            Value::Array(_) => Some(Self {
                commission_config: sanitize(value),
                deposit_percent: None,
                deal_value: None,
                format: StoredFormat::Legacy,
            }),
            Value::Object(fields) if fields.contains_key(CONFIG_KEY) => {
                let lines = match &fields[CONFIG_KEY] {
                    Value::String(text) => serde_json::from_str::<Value>(text)
                        .map(|parsed| sanitize(&parsed))
                        .unwrap_or_default(),
                    other => sanitize(other),
                };
                let number = |key: &str| {
                    fields
                        .get(key)
                        .filter(|v| !v.is_null())
                        .map(coerce_decimal)
                };

                Some(Self {
                    commission_config: lines,
                    deposit_percent: number(DEPOSIT_PERCENT_KEY),
                    deal_value: number(DEAL_VALUE_KEY),
                    format: StoredFormat::Combined,
                })
            }
            _ => None,
        }
    }

    /// Encodes in the combined shape for persistence
    pub fn encode(&self) -> Value {
        json!({
            CONFIG_KEY: self.commission_config,
            DEPOSIT_PERCENT_KEY: self.deposit_percent,
            DEAL_VALUE_KEY: self.deal_value,
        })
    }

    /// Serializes the combined shape to the text stored in the CRM field
    pub fn to_json_string(&self) -> Result<String, CommissionError> {
        Ok(serde_json::to_string(&self.encode())?)
    }

    /// True when no lines were stored
    pub fn is_empty(&self) -> bool {
        self.commission_config.is_empty()
    }
}

impl Default for StoredCommission {
    fn default() -> Self {
        Self::empty()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
