//! Commission line configuration and sanitization
//!
//! Stored and edited configurations are untyped JSON. [`sanitize`] turns any
//! JSON value into a well-formed list of [`CommissionLineConfig`], filling
//! positional defaults and coercing numbers, and never fails.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use core_kernel::{bound_magnitude, coerce_decimal, coerce_flag, coerce_text, LineId, Rate};

/// The base a line's percentage applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliesTo {
    /// The whole deal value
    #[default]
    Total,
    /// The deposit portion of the deal
    Deposit,
    /// The deal value minus the deposit
    Remaining,
}

impl AppliesTo {
    /// Reads a base selector from JSON; anything but an exact wire name is `Total`
    pub fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some("deposit") => AppliesTo::Deposit,
            Some("remaining") => AppliesTo::Remaining,
            _ => AppliesTo::Total,
        }
    }

    /// Returns the wire name of the selector
    pub fn as_str(&self) -> &'static str {
        match self {
            AppliesTo::Total => "total",
            AppliesTo::Deposit => "deposit",
            AppliesTo::Remaining => "remaining",
        }
    }
}

impl fmt::Display for AppliesTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sanitized commission line
///
/// Field names on the wire match the stored CRM payload, including the
/// historical `substractOtherDepostit` spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionLineConfig {
    /// Stable identifier
    pub id: LineId,
    /// Display label
    pub name: String,
    /// Base selector
    pub applies_to: AppliesTo,
    /// Rate in percentage points, not clamped
    pub percent: Decimal,
    /// Flat amount added after the percentage amount
    pub fixed: Decimal,
    /// Deposit line whose base is net of the plain deposit fees
    #[serde(rename = "substractOtherDepostit", default)]
    pub subtract_other_deposit: bool,
    /// Free-text note carried through unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CommissionLineConfig {
    /// Creates a line without the subtract flag or a comment
    pub fn new(
        id: impl Into<LineId>,
        name: impl Into<String>,
        applies_to: AppliesTo,
        percent: Decimal,
        fixed: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            applies_to,
            percent,
            fixed,
            subtract_other_deposit: false,
            comment: None,
        }
    }

    /// Sets the subtract-other-deposit flag
    pub fn with_subtract_other_deposit(mut self, flag: bool) -> Self {
        self.subtract_other_deposit = flag;
        self
    }

    /// Attaches a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// A fresh, empty line as added from an editor
    ///
    /// # Arguments
    ///
    /// * `position` - 1-based position the line will occupy
    pub fn blank(position: usize) -> Self {
        Self::new(
            LineId::generate(),
            format!("New line {}", position),
            AppliesTo::Total,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }

    /// Reads one entry of a raw configuration array
    ///
    /// Returns `None` for entries that are not JSON objects.
    ///
    /// # Arguments
    ///
    /// * `entry` - The raw JSON entry
    /// * `position` - 1-based position of the entry in the original array
    pub fn from_value(entry: &Value, position: usize) -> Option<Self> {
        let fields = entry.as_object()?;

        let line = Self {
            id: coerce_text(field(fields, "id"))
                .map(LineId::from)
                .unwrap_or_else(|| LineId::positional(position)),
            name: text_field(fields, "name").unwrap_or_default(),
            applies_to: AppliesTo::from_value(field(fields, "appliesTo")),
            percent: coerce_decimal(field(fields, "percent")),
            fixed: coerce_decimal(field(fields, "fixed")),
            subtract_other_deposit: coerce_flag(field(fields, "substractOtherDepostit")),
            comment: text_field(fields, "comment"),
        };

        Some(line.normalized(position))
    }

    /// Applies the positional defaults and bounds to an already typed line
    pub fn normalized(mut self, position: usize) -> Self {
        if self.id.as_str().trim().is_empty() {
            self.id = LineId::positional(position);
        }

        let name = self.name.trim();
        self.name = if name.is_empty() {
            format!("Line {}", position)
        } else {
            name.to_string()
        };

        self.comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self.percent = bound_magnitude(self.percent);
        self.fixed = bound_magnitude(self.fixed);
        self
    }

    /// The line's percentage as a rate
    pub fn rate(&self) -> Rate {
        Rate::from_percentage(self.percent)
    }

    /// A deposit line computed on the full deposit
    pub fn is_pure_deposit_fee(&self) -> bool {
        self.applies_to == AppliesTo::Deposit && !self.subtract_other_deposit
    }

    /// A deposit line computed on the deposit net of the pure deposit fees
    pub fn is_net_deposit_fee(&self) -> bool {
        self.applies_to == AppliesTo::Deposit && self.subtract_other_deposit
    }
}

static NULL: Value = Value::Null;

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a Value {
    fields.get(key).unwrap_or(&NULL)
}

// Only ids accept numbers; other text fields are blank unless they are strings.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    field(fields, key).as_str().map(str::to_string)
}

/// Turns an untyped configuration into well-formed lines
///
/// Non-array input yields no lines. Entries that are not objects are dropped;
/// positional defaults (`line-{n}`, `Line {n}`) use the entry's 1-based index
/// in the original array, so dropped entries leave gaps in the numbering.
///
/// # Example
///
/// ```rust
/// use domain_commission::sanitize;
/// use serde_json::json;
///
/// let lines = sanitize(&json!([null, {"percent": "40"}]));
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].name, "Line 2");
/// ```
pub fn sanitize(raw: &Value) -> Vec<CommissionLineConfig> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| CommissionLineConfig::from_value(entry, index + 1))
        .collect()
}

/// The two-partner split offered when a deal has no configuration yet
pub fn default_lines() -> Vec<CommissionLineConfig> {
    vec![
        CommissionLineConfig::new("partner-primary", "Partner A", AppliesTo::Total, dec!(65), Decimal::ZERO),
        CommissionLineConfig::new("partner-secondary", "Partner B", AppliesTo::Total, dec!(35), Decimal::ZERO),
    ]
}

/// Sanitizes a configuration, substituting [`default_lines`] when nothing survives
pub fn ensure_config(raw: &Value) -> Vec<CommissionLineConfig> {
    let lines = sanitize(raw);
    if lines.is_empty() {
        default_lines()
    } else {
        lines
    }
}
