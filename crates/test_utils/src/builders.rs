//! Test Data Builders
//!
//! Provides builder patterns for constructing commission lines with sensible
//! defaults. Tests specify only the relevant fields and build either a typed
//! line or the raw JSON entry a stored configuration would hold.

use core_kernel::LineId;
use domain_commission::{AppliesTo, CommissionLineConfig};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

/// Builder for commission lines
#[derive(Debug, Clone)]
pub struct LineConfigBuilder {
    id: Option<String>,
    name: Option<String>,
    applies_to: AppliesTo,
    percent: Decimal,
    fixed: Decimal,
    subtract_other_deposit: bool,
    comment: Option<String>,
}

impl Default for LineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineConfigBuilder {
    /// Creates a new builder for a total-scoped 0% line
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            applies_to: AppliesTo::Total,
            percent: Decimal::ZERO,
            fixed: Decimal::ZERO,
            subtract_other_deposit: false,
            comment: None,
        }
    }

    /// Shortcut for a deposit line
    pub fn deposit(percent: Decimal) -> Self {
        Self::new().applies_to(AppliesTo::Deposit).percent(percent)
    }

    /// Shortcut for a total-scoped line
    pub fn total(percent: Decimal) -> Self {
        Self::new().percent(percent)
    }

    /// Shortcut for a remaining-scoped line
    pub fn remaining(percent: Decimal) -> Self {
        Self::new().applies_to(AppliesTo::Remaining).percent(percent)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn applies_to(mut self, applies_to: AppliesTo) -> Self {
        self.applies_to = applies_to;
        self
    }

    pub fn percent(mut self, percent: Decimal) -> Self {
        self.percent = percent;
        self
    }

    pub fn fixed(mut self, fixed: Decimal) -> Self {
        self.fixed = fixed;
        self
    }

    /// Marks a deposit line as computed on the net deposit
    pub fn net_of_other_deposit_fees(mut self) -> Self {
        self.subtract_other_deposit = true;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builds a typed line; missing id and name are left blank for the engine
    /// to fill positionally
    pub fn build(self) -> CommissionLineConfig {
        CommissionLineConfig {
            id: LineId::new(self.id.unwrap_or_default()),
            name: self.name.unwrap_or_default(),
            applies_to: self.applies_to,
            percent: self.percent,
            fixed: self.fixed,
            subtract_other_deposit: self.subtract_other_deposit,
            comment: self.comment,
        }
    }

    /// Builds the raw JSON entry, omitting unset optional fields
    pub fn build_json(self) -> Value {
        let mut entry = Map::new();
        if let Some(id) = self.id {
            entry.insert("id".into(), json!(id));
        }
        if let Some(name) = self.name {
            entry.insert("name".into(), json!(name));
        }
        entry.insert("appliesTo".into(), json!(self.applies_to.as_str()));
        entry.insert("percent".into(), json!(self.percent));
        entry.insert("fixed".into(), json!(self.fixed));
        if self.subtract_other_deposit {
            entry.insert("substractOtherDepostit".into(), json!(true));
        }
        if let Some(comment) = self.comment {
            entry.insert("comment".into(), json!(comment));
        }
        Value::Object(entry)
    }
}

/// Collects built lines into a raw configuration array
pub fn raw_config(lines: impl IntoIterator<Item = LineConfigBuilder>) -> Value {
    Value::Array(lines.into_iter().map(LineConfigBuilder::build_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_commission::sanitize;
    use rust_decimal_macros::dec;

    #[test]
    fn test_typed_and_raw_builds_agree() {
        let builder = LineConfigBuilder::deposit(dec!(10))
            .id("agency")
            .name("Agency")
            .fixed(dec!(25))
            .net_of_other_deposit_fees();

        let from_json = sanitize(&raw_config([builder.clone()]));
        assert_eq!(from_json, vec![builder.build()]);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let entry = LineConfigBuilder::total(dec!(5)).build_json();
        assert!(entry.get("id").is_none());
        assert!(entry.get("substractOtherDepostit").is_none());
    }
}
