//! Per-line results and the deal-level allocation summary

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::round_currency;

use crate::engine::CalculationModel;
use crate::is_balanced;
use crate::line::CommissionLineConfig;
use crate::split::DepositSplit;

/// Unrounded amounts resolved for one line by a calculation model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineAmounts {
    pub base: Decimal,
    pub percent_amount: Decimal,
    pub deposit_share: Decimal,
    pub remaining_share: Decimal,
}

impl LineAmounts {
    /// A line whose whole percentage amount comes out of the deposit
    pub fn on_deposit(base: Decimal, percent_amount: Decimal) -> Self {
        Self {
            base,
            percent_amount,
            deposit_share: percent_amount,
            remaining_share: Decimal::ZERO,
        }
    }

    /// A line whose whole percentage amount comes out of the remaining portion
    pub fn on_remaining(base: Decimal, percent_amount: Decimal) -> Self {
        Self {
            base,
            percent_amount,
            deposit_share: Decimal::ZERO,
            remaining_share: percent_amount,
        }
    }
}

/// The monetary breakdown of one commission line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionLineResult {
    /// The sanitized configuration the line was computed from
    #[serde(flatten)]
    pub config: CommissionLineConfig,
    /// The amount the percentage was applied to
    pub base_amount: Decimal,
    /// `base_amount * percent / 100`
    pub percent_amount: Decimal,
    /// Share of the percentage amount attributed to the deposit (display only)
    pub deposit_amount: Decimal,
    /// Share of the percentage amount attributed to the remaining portion (display only)
    pub remaining_amount: Decimal,
    /// `percent_amount + fixed`
    pub total: Decimal,
}

impl CommissionLineResult {
    /// Rounds resolved amounts into a line result
    pub(crate) fn assemble(config: CommissionLineConfig, amounts: LineAmounts) -> Self {
        let percent_amount = round_currency(amounts.percent_amount);
        let total = round_currency(percent_amount.saturating_add(config.fixed));

        Self {
            base_amount: round_currency(amounts.base),
            percent_amount,
            deposit_amount: round_currency(amounts.deposit_share),
            remaining_amount: round_currency(amounts.remaining_share),
            total,
            config,
        }
    }

    /// The line's display name
    pub fn name(&self) -> &str {
        &self.config.name
    }
}

/// The full result of splitting a deal among its commission lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    /// The model that produced this summary
    pub model: CalculationModel,
    pub deal_value: Decimal,
    pub deposit_percent: Decimal,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    /// Line results, in configuration order
    pub lines: Vec<CommissionLineResult>,
    /// Sum of all line totals
    pub total_disbursed: Decimal,
    /// `deal_value - total_disbursed`
    pub difference_to_deal_value: Decimal,
    /// Whether the lines add up to the deal value within a cent
    pub matches_deal_value: bool,
    /// The sanitized configuration, ready to be persisted
    pub commission_config: Vec<CommissionLineConfig>,
}

impl AllocationSummary {
    pub(crate) fn assemble(
        model: CalculationModel,
        split: DepositSplit,
        lines: Vec<CommissionLineResult>,
    ) -> Self {
        let total_disbursed =
            round_currency(lines.iter().map(|l| l.total).fold(Decimal::ZERO, Decimal::saturating_add));
        let difference_to_deal_value = round_currency(split.deal_value.saturating_sub(total_disbursed));
        let commission_config = lines.iter().map(|l| l.config.clone()).collect();

        Self {
            model,
            deal_value: split.deal_value,
            deposit_percent: split.deposit_percent,
            deposit_amount: split.deposit_amount,
            remaining_amount: split.remaining_amount,
            matches_deal_value: is_balanced(split.deal_value, total_disbursed),
            lines,
            total_disbursed,
            difference_to_deal_value,
            commission_config,
        }
    }

    /// Line totals in configuration order
    pub fn line_totals(&self) -> Vec<Decimal> {
        self.lines.iter().map(|l| l.total).collect()
    }

    /// Looks up a line result by id
    pub fn line(&self, id: &str) -> Option<&CommissionLineResult> {
        self.lines.iter().find(|l| l.config.id.as_str() == id)
    }

    /// The split this summary was computed from
    pub fn split(&self) -> DepositSplit {
        DepositSplit {
            deal_value: self.deal_value,
            deposit_percent: self.deposit_percent,
            deposit_amount: self.deposit_amount,
            remaining_amount: self.remaining_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::AppliesTo;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assemble_rounds_percent_before_adding_fixed() {
        let config = CommissionLineConfig::new("a", "A", AppliesTo::Total, dec!(33.333), dec!(0.004));
        let result = CommissionLineResult::assemble(
            config,
            LineAmounts::on_deposit(dec!(100), dec!(33.333)),
        );

        assert_eq!(result.percent_amount, dec!(33.33));
        assert_eq!(result.total, dec!(33.33));
        assert_eq!(result.deposit_amount, dec!(33.33));
        assert_eq!(result.remaining_amount, dec!(0));
    }

    #[test]
    fn test_summary_of_no_lines() {
        let split = DepositSplit::compute(dec!(250), dec!(0));
        let summary = AllocationSummary::assemble(CalculationModel::Advanced, split, Vec::new());

        assert_eq!(summary.total_disbursed, dec!(0));
        assert_eq!(summary.difference_to_deal_value, dec!(250));
        assert!(!summary.matches_deal_value);
    }

    #[test]
    fn test_serialized_line_is_flat() {
        let config = CommissionLineConfig::new("a", "A", AppliesTo::Remaining, dec!(10), dec!(5));
        let result = CommissionLineResult::assemble(config, LineAmounts::on_remaining(dec!(800), dec!(80)));
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["appliesTo"], serde_json::json!("remaining"));
        assert!(value.get("config").is_none());
        assert!(value.get("percentAmount").is_some());
        assert!(value["total"].is_number());
        assert!(value["percent"].is_number());
        assert_eq!(value["total"].to_string(), "85");
    }
}
