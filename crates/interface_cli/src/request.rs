//! Calculation requests read from JSON input
//!
//! A request is either a stored configuration in any of its shapes or an
//! object carrying the deal value alongside it:
//!
//! ```json
//! {
//!   "dealValue": 1000,
//!   "depositPercent": 20,
//!   "model": "advanced",
//!   "commissionConfig": [{"name": "Partner A", "appliesTo": "total", "percent": 100}],
//!   "subDeals": [{"id": 12, "title": "Garage", "value": 200, "depositPercent": 10, "commissionConfig": []}]
//! }
//! ```

use rust_decimal::Decimal;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use core_kernel::{coerce_decimal, coerce_text, parse_amount, DealId};
use domain_commission::{
    default_lines, CalculationModel, CommissionLineConfig, StoredCommission, StoredFormat, SubDeal,
};

use crate::error::{CliError, CliResult};

/// A decoded calculation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcRequest {
    pub deal_value: Decimal,
    pub deposit_percent: Decimal,
    pub lines: Vec<CommissionLineConfig>,
    /// Model named in the request itself, if any
    pub model: Option<CalculationModel>,
    pub sub_deals: Vec<SubDeal>,
    /// Shape the lines were read from
    pub format: StoredFormat,
}

/// Values given on the command line that take precedence over the input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub deal_value: Option<String>,
    pub deposit_percent: Option<String>,
}

/// Reads the raw request text from a file, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Stdin)?;
            Ok(text)
        }
    }
}

impl CalcRequest {
    /// Parses request text
    pub fn parse(text: &str) -> CliResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Decodes a parsed request
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidRequest`] for anything but an object, an
    /// array or a string, and [`CliError::Commission`] for an unknown model.
    pub fn from_value(value: &Value) -> CliResult<Self> {
        match value {
            Value::Object(fields) => {
                let stored = StoredCommission::decode(value);
                let model = fields
                    .get("model")
                    .and_then(coerce_text)
                    .map(|name| name.parse::<CalculationModel>())
                    .transpose()?;
                let sub_deals = match fields.get("subDeals") {
                    Some(Value::Array(entries)) => entries
                        .iter()
                        .enumerate()
                        .filter_map(|(index, entry)| sub_deal(entry, index + 1))
                        .collect(),
                    _ => Vec::new(),
                };
                let deal_value = fields
                    .get("dealValue")
                    .map(coerce_decimal)
                    .or(stored.deal_value)
                    .unwrap_or_default();
                let deposit_percent = fields
                    .get("depositPercent")
                    .map(coerce_decimal)
                    .or(stored.deposit_percent)
                    .unwrap_or_default();

                Ok(Self {
                    deal_value,
                    deposit_percent,
                    lines: stored.commission_config,
                    model,
                    sub_deals,
                    format: stored.format,
                })
            }
            Value::Array(_) | Value::String(_) => {
                let stored = StoredCommission::decode(value);
                Ok(Self {
                    deal_value: stored.deal_value.unwrap_or_default(),
                    deposit_percent: stored.deposit_percent.unwrap_or_default(),
                    lines: stored.commission_config,
                    model: None,
                    sub_deals: Vec::new(),
                    format: stored.format,
                })
            }
            _ => Err(CliError::InvalidRequest(
                "expected an object, a line array or a stored configuration string".to_string(),
            )),
        }
    }

    /// Applies command line overrides
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidOverride`] when an override is not a number.
    pub fn apply(mut self, overrides: &Overrides) -> CliResult<Self> {
        if let Some(text) = &overrides.deal_value {
            self.deal_value = parse_amount(text)?;
        }
        if let Some(text) = &overrides.deposit_percent {
            self.deposit_percent = parse_amount(text)?;
        }
        Ok(self)
    }

    /// Substitutes the default partner split when no lines are configured
    pub fn with_default_lines(mut self) -> Self {
        if self.lines.is_empty() {
            tracing::info!("No commission lines configured, using the default split");
            self.lines = default_lines();
        }
        self
    }
}

static NULL: Value = Value::Null;

fn sub_deal(entry: &Value, position: usize) -> Option<SubDeal> {
    let fields = entry.as_object()?;
    let id = fields
        .get("id")
        .and_then(coerce_text)
        .map(DealId::from)
        .unwrap_or_else(|| DealId::positional(position));
    let title = fields.get("title").and_then(Value::as_str);

    Some(SubDeal::from_raw(
        id,
        title,
        fields.get("value").unwrap_or(&NULL),
        fields.get("depositPercent").unwrap_or(&NULL),
        fields.get("commissionConfig").unwrap_or(&NULL),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_request() {
        let request = CalcRequest::from_value(&json!({
            "dealValue": "1000",
            "depositPercent": 20,
            "model": "simple",
            "commissionConfig": [{"percent": 100}]
        }))
        .unwrap();

        assert_eq!(request.deal_value, Decimal::from(1000));
        assert_eq!(request.deposit_percent, Decimal::from(20));
        assert_eq!(request.model, Some(CalculationModel::Simple));
        assert_eq!(request.lines.len(), 1);
        assert_eq!(request.format, StoredFormat::Combined);
    }

    #[test]
    fn test_legacy_array_request() {
        let request = CalcRequest::from_value(&json!([{"percent": 100}])).unwrap();

        assert_eq!(request.format, StoredFormat::Legacy);
        assert_eq!(request.deal_value, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let result = CalcRequest::from_value(&json!({"model": "fancy"}));
        assert!(matches!(result, Err(CliError::Commission(_))));
    }

    #[test]
    fn test_scalar_request_is_rejected() {
        assert!(matches!(
            CalcRequest::from_value(&json!(12)),
            Err(CliError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_sub_deals_get_positional_ids() {
        let request = CalcRequest::from_value(&json!({
            "commissionConfig": [],
            "subDeals": [{"value": 10}, "junk", {"id": 99, "title": "Garage"}]
        }))
        .unwrap();

        assert_eq!(request.sub_deals.len(), 2);
        assert_eq!(request.sub_deals[0].id.as_str(), "deal-1");
        assert_eq!(request.sub_deals[0].title, "Deal deal-1");
        assert_eq!(request.sub_deals[1].id.as_str(), "99");
    }

    #[test]
    fn test_overrides() {
        let request = CalcRequest::from_value(&json!([]))
            .unwrap()
            .apply(&Overrides {
                deal_value: Some("2500.5".into()),
                deposit_percent: None,
            })
            .unwrap();
        assert_eq!(request.deal_value, "2500.5".parse::<Decimal>().unwrap());

        let bad = CalcRequest::from_value(&json!([])).unwrap().apply(&Overrides {
            deal_value: Some("lots".into()),
            deposit_percent: None,
        });
        assert!(matches!(bad, Err(CliError::InvalidOverride(_))));
    }
}
