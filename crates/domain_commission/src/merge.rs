//! Merging a deal's commissions with those of its sub-deals
//!
//! A parent deal can reference sub-deals that carry their own commission
//! configuration. Each sub-deal is computed on its own, then every line is
//! grouped by recipient name so a recipient's shares across deals read
//! together.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use core_kernel::{coerce_decimal, coerce_text, DealId};

use crate::engine::AllocationEngine;
use crate::split::DepositSplit;
use crate::stored::StoredCommission;
use crate::summary::{AllocationSummary, CommissionLineResult};

/// A sub-deal referenced by a parent deal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDeal {
    pub id: DealId,
    pub title: String,
    pub value: Decimal,
    pub deposit_percent: Decimal,
    pub commission_config: StoredCommission,
}

impl SubDeal {
    /// Builds a sub-deal from the raw values a CRM deal record carries
    ///
    /// # Arguments
    ///
    /// * `id` - The sub-deal's identifier
    /// * `title` - The deal title, if any; defaults to `Deal {id}`
    /// * `value` - Raw deal value
    /// * `deposit_percent` - Raw deposit percentage
    /// * `stored_config` - Raw stored commission configuration, any shape
    pub fn from_raw(
        id: DealId,
        title: Option<&str>,
        value: &Value,
        deposit_percent: &Value,
        stored_config: &Value,
    ) -> Self {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Deal {}", id));

        Self {
            title,
            value: coerce_decimal(value),
            deposit_percent: coerce_decimal(deposit_percent),
            commission_config: StoredCommission::decode(stored_config),
            id,
        }
    }

    /// Computes this sub-deal's allocation
    pub fn summarize(&self, engine: &AllocationEngine) -> AllocationSummary {
        engine.summarize(self.value, self.deposit_percent, &self.commission_config.commission_config)
    }

    /// This sub-deal's deposit split
    pub fn split(&self) -> DepositSplit {
        DepositSplit::compute(self.value, self.deposit_percent)
    }
}

/// Where a merged line came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum LineSource {
    /// The parent deal
    Main,
    /// One of the parent's sub-deals
    #[serde(rename_all = "camelCase")]
    SubDeal { deal_id: DealId, deal_title: String },
}

/// A line result tagged with its source deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedLine {
    #[serde(flatten)]
    pub line: CommissionLineResult,
    #[serde(flatten)]
    pub source: LineSource,
}

/// All lines sharing one recipient name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedGroup {
    pub name: String,
    pub items: Vec<MergedLine>,
}

impl MergedGroup {
    /// Sum of the group's line totals
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.line.total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// Groups the parent's lines and every sub-deal's lines by recipient name
///
/// Groups appear in the order their name is first seen: the parent's lines
/// first, then each sub-deal in turn. Sub-deals without configured lines are
/// skipped.
pub fn merge_with_sub_deals(
    main: &[CommissionLineResult],
    sub_deals: &[SubDeal],
    engine: &AllocationEngine,
) -> Vec<MergedGroup> {
    let mut groups: Vec<MergedGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut push = |line: CommissionLineResult, source: LineSource| {
        let slot = *index.entry(line.config.name.clone()).or_insert_with(|| {
            groups.push(MergedGroup {
                name: line.config.name.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(MergedLine { line, source });
    };

    for line in main {
        push(line.clone(), LineSource::Main);
    }

    for sub_deal in sub_deals.iter().filter(|s| !s.commission_config.is_empty()) {
        let summary = sub_deal.summarize(engine);
        for line in summary.lines {
            push(
                line,
                LineSource::SubDeal {
                    deal_id: sub_deal.id.clone(),
                    deal_title: sub_deal.title.clone(),
                },
            );
        }
    }

    groups
}

/// Deposit and remaining amounts summed across sub-deals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDealTotals {
    pub deposit_total: Decimal,
    pub remaining_total: Decimal,
}

impl SubDealTotals {
    pub fn from_sub_deals(sub_deals: &[SubDeal]) -> Self {
        sub_deals.iter().map(SubDeal::split).fold(Self::default(), |acc, split| Self {
            deposit_total: acc.deposit_total.saturating_add(split.deposit_amount),
            remaining_total: acc.remaining_total.saturating_add(split.remaining_amount),
        })
    }
}

/// Reads the list of sub-deal ids stored on a parent deal
///
/// Accepts a JSON array or a string holding one; ids are trimmed and blanks
/// dropped. Anything else yields no ids.
pub fn parse_sub_deal_ids(raw: &Value) -> Vec<DealId> {
    let parsed;
    let ids = match raw {
        Value::Array(ids) => ids,
        Value::String(text) => {
            parsed = serde_json::from_str::<Value>(text).unwrap_or(Value::Null);
            match &parsed {
                Value::Array(ids) => ids,
                _ => {
                    if !text.trim().is_empty() {
                        tracing::warn!("Ignoring malformed sub-deal id list");
                    }
                    return Vec::new();
                }
            }
        }
        _ => return Vec::new(),
    };

    ids.iter().filter_map(coerce_text).map(DealId::from).collect()
}
