//! Base resolution and the allocation engine
//!
//! Two models resolve the base each line's percentage applies to:
//!
//! - **Simple**: a line's base is the deposit, the remaining portion or the
//!   deal value, with no interaction between lines.
//! - **Advanced**: deposit fees cascade. Plain deposit fees are taken from the
//!   deposit first; flagged deposit fees are then computed on what is left;
//!   total-scoped lines are computed on the deal value net of every fixed
//!   amount and every deposit and remaining fee.
//!
//! Both models share one rounding discipline: intermediate sums are exact
//! decimals and each line's amounts are rounded to currency precision when
//! the line result is emitted. Products and sums saturate at the bounds of
//! [`Decimal`] instead of overflowing, so extreme percentages yield extreme
//! amounts rather than a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use core_kernel::coerce_decimal;

use crate::error::CommissionError;
use crate::line::{sanitize, AppliesTo, CommissionLineConfig};
use crate::split::DepositSplit;
use crate::summary::{AllocationSummary, CommissionLineResult, LineAmounts};

/// Which base-resolution rules to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationModel {
    /// Independent bases, no subtract flag
    Simple,
    /// Cascading deposit fees
    #[default]
    Advanced,
}

impl CalculationModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationModel::Simple => "simple",
            CalculationModel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CalculationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationModel {
    type Err = CommissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(CalculationModel::Simple),
            "advanced" => Ok(CalculationModel::Advanced),
            other => Err(CommissionError::UnknownModel(other.to_string())),
        }
    }
}

/// The intermediate bases of the advanced model
///
/// Pure deposit fees are always resolved before net deposit fees, since the
/// latter are computed on the deposit left after the former.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeBases {
    pub deal_value: Decimal,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    /// Sum of every line's fixed amount
    pub total_fixed_amounts: Decimal,
    /// Deposit fees computed on the full deposit
    pub pure_deposit_commissions: Decimal,
    /// `deposit_amount - pure_deposit_commissions`
    pub adjusted_deposit_for_net: Decimal,
    /// Flagged deposit fees computed on `adjusted_deposit_for_net`
    pub net_deposit_commissions: Decimal,
    /// `pure_deposit_commissions + net_deposit_commissions`
    pub total_all_deposit_commissions: Decimal,
    /// Remaining-scoped fees computed on the remaining portion
    pub remaining_commissions: Decimal,
    /// Base for total-scoped lines
    pub adjusted_base_for_total: Decimal,
    /// Deposit share of the total-scoped base (display only)
    pub adjusted_deposit_for_total: Decimal,
    /// Remaining share of the total-scoped base (display only)
    pub adjusted_remaining_for_total: Decimal,
}

impl CascadeBases {
    /// Runs the deposit-fee passes over a sanitized configuration
    ///
    /// # Arguments
    ///
    /// * `lines` - Sanitized lines, in configuration order
    /// * `split` - The deal's deposit split
    pub fn resolve(lines: &[CommissionLineConfig], split: &DepositSplit) -> Self {
        let deposit_amount = split.deposit_amount;

        let mut total_fixed_amounts = Decimal::ZERO;
        let mut pure_deposit_commissions = Decimal::ZERO;
        for line in lines {
            total_fixed_amounts = total_fixed_amounts.saturating_add(line.fixed);
            if line.is_pure_deposit_fee() {
                pure_deposit_commissions =
                    pure_deposit_commissions.saturating_add(line.rate().of(deposit_amount));
            }
        }

        let adjusted_deposit_for_net = deposit_amount.saturating_sub(pure_deposit_commissions);

        let net_deposit_commissions = lines
            .iter()
            .filter(|line| line.is_net_deposit_fee())
            .map(|line| line.rate().of(adjusted_deposit_for_net))
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let remaining_commissions = lines
            .iter()
            .filter(|line| line.applies_to == AppliesTo::Remaining)
            .map(|line| line.rate().of(split.remaining_amount))
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let total_all_deposit_commissions =
            pure_deposit_commissions.saturating_add(net_deposit_commissions);
        let adjusted_base_for_total = split
            .deal_value
            .saturating_sub(total_fixed_amounts)
            .saturating_sub(total_all_deposit_commissions)
            .saturating_sub(remaining_commissions);
        let adjusted_deposit_for_total = deposit_amount.saturating_sub(total_all_deposit_commissions);
        let adjusted_remaining_for_total =
            adjusted_base_for_total.saturating_sub(adjusted_deposit_for_total);

        Self {
            deal_value: split.deal_value,
            deposit_amount,
            remaining_amount: split.remaining_amount,
            total_fixed_amounts,
            pure_deposit_commissions,
            adjusted_deposit_for_net,
            net_deposit_commissions,
            total_all_deposit_commissions,
            remaining_commissions,
            adjusted_base_for_total,
            adjusted_deposit_for_total,
            adjusted_remaining_for_total,
        }
    }

    fn line_amounts(&self, line: &CommissionLineConfig) -> LineAmounts {
        let rate = line.rate();
        match line.applies_to {
            AppliesTo::Deposit if line.subtract_other_deposit => LineAmounts::on_deposit(
                self.adjusted_deposit_for_net,
                rate.of(self.adjusted_deposit_for_net),
            ),
            AppliesTo::Deposit => {
                LineAmounts::on_deposit(self.deposit_amount, rate.of(self.deposit_amount))
            }
            AppliesTo::Remaining => {
                LineAmounts::on_remaining(self.remaining_amount, rate.of(self.remaining_amount))
            }
            AppliesTo::Total => LineAmounts {
                base: self.adjusted_base_for_total,
                percent_amount: rate.of(self.adjusted_base_for_total),
                deposit_share: rate.of(self.adjusted_deposit_for_total),
                remaining_share: rate.of(self.adjusted_remaining_for_total),
            },
        }
    }
}

fn simple_line_amounts(line: &CommissionLineConfig, split: &DepositSplit) -> LineAmounts {
    let rate = line.rate();
    match line.applies_to {
        AppliesTo::Deposit => LineAmounts::on_deposit(split.deposit_amount, rate.of(split.deposit_amount)),
        AppliesTo::Remaining => {
            LineAmounts::on_remaining(split.remaining_amount, rate.of(split.remaining_amount))
        }
        AppliesTo::Total => LineAmounts {
            base: split.deal_value,
            percent_amount: rate.of(split.deal_value),
            deposit_share: rate.of(split.deposit_amount),
            remaining_share: rate.of(split.remaining_amount),
        },
    }
}

/// Splits deal values among commission lines
///
/// The engine is a stateless value; it can be copied freely and shared across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationEngine {
    model: CalculationModel,
}

impl AllocationEngine {
    /// Creates an engine for the given model
    pub fn new(model: CalculationModel) -> Self {
        Self { model }
    }

    /// The model this engine applies
    pub fn model(&self) -> CalculationModel {
        self.model
    }

    /// Computes the allocation summary for typed inputs
    ///
    /// Lines are re-normalized (positional defaults and magnitude bounds), so
    /// hand-built configurations behave like sanitized ones.
    ///
    /// # Arguments
    ///
    /// * `deal_value` - The amount being split
    /// * `deposit_percent` - Deposit percentage; clamped into `[0, 100]`
    /// * `lines` - Commission lines, in order
    pub fn summarize(
        &self,
        deal_value: Decimal,
        deposit_percent: Decimal,
        lines: &[CommissionLineConfig],
    ) -> AllocationSummary {
        let split = DepositSplit::compute(deal_value, deposit_percent);
        let lines: Vec<CommissionLineConfig> = lines
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, line)| line.normalized(index + 1))
            .collect();

        let results = match self.model {
            CalculationModel::Simple => lines
                .into_iter()
                .map(|line| {
                    let amounts = simple_line_amounts(&line, &split);
                    CommissionLineResult::assemble(line, amounts)
                })
                .collect(),
            CalculationModel::Advanced => {
                let bases = CascadeBases::resolve(&lines, &split);
                lines
                    .into_iter()
                    .map(|line| {
                        let amounts = bases.line_amounts(&line);
                        CommissionLineResult::assemble(line, amounts)
                    })
                    .collect()
            }
        };

        let summary = AllocationSummary::assemble(self.model, split, results);

        tracing::debug!(
            model = %self.model,
            lines = summary.lines.len(),
            deal_value = %summary.deal_value,
            total_disbursed = %summary.total_disbursed,
            "Computed commission allocation"
        );
        if !summary.matches_deal_value {
            tracing::debug!(
                difference = %summary.difference_to_deal_value,
                "Commission lines do not add up to the deal value"
            );
        }

        summary
    }

    /// Computes the allocation summary for untyped inputs
    ///
    /// Every argument is coerced leniently; this never fails.
    pub fn summarize_raw(
        &self,
        deal_value: &Value,
        deposit_percent: &Value,
        raw_lines: &Value,
    ) -> AllocationSummary {
        self.summarize(
            coerce_decimal(deal_value),
            coerce_decimal(deposit_percent),
            &sanitize(raw_lines),
        )
    }

    /// Exposes the advanced model's intermediate bases
    pub fn cascade(
        &self,
        deal_value: Decimal,
        deposit_percent: Decimal,
        lines: &[CommissionLineConfig],
    ) -> CascadeBases {
        CascadeBases::resolve(lines, &DepositSplit::compute(deal_value, deposit_percent))
    }
}

/// Computes an allocation summary with the default (advanced) model
///
/// # Arguments
///
/// * `deal_value` - Any numeric or numeric-text JSON value
/// * `deposit_percent` - Any numeric or numeric-text JSON value
/// * `raw_lines` - The untyped line configuration
pub fn compute_summary(deal_value: &Value, deposit_percent: &Value, raw_lines: &Value) -> AllocationSummary {
    compute_summary_with(CalculationModel::default(), deal_value, deposit_percent, raw_lines)
}

/// Computes an allocation summary with an explicit model
pub fn compute_summary_with(
    model: CalculationModel,
    deal_value: &Value,
    deposit_percent: &Value,
    raw_lines: &Value,
) -> AllocationSummary {
    AllocationEngine::new(model).summarize_raw(deal_value, deposit_percent, raw_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(applies_to: AppliesTo, percent: Decimal, fixed: Decimal) -> CommissionLineConfig {
        CommissionLineConfig::new("", "", applies_to, percent, fixed)
    }

    #[test]
    fn test_cascade_deposit_fees() {
        let lines = vec![
            line(AppliesTo::Deposit, dec!(10), dec!(0)),
            line(AppliesTo::Deposit, dec!(10), dec!(0)).with_subtract_other_deposit(true),
        ];
        let bases = CascadeBases::resolve(&lines, &DepositSplit::compute(dec!(1000), dec!(50)));

        assert_eq!(bases.pure_deposit_commissions, dec!(50));
        assert_eq!(bases.adjusted_deposit_for_net, dec!(450));
        assert_eq!(bases.net_deposit_commissions, dec!(45));
        assert_eq!(bases.total_all_deposit_commissions, dec!(95));
        assert_eq!(bases.adjusted_base_for_total, dec!(905));
        assert_eq!(bases.adjusted_deposit_for_total, dec!(405));
        assert_eq!(bases.adjusted_remaining_for_total, dec!(500));
    }

    #[test]
    fn test_fixed_amounts_reduce_total_base() {
        let lines = vec![
            line(AppliesTo::Total, dec!(60), dec!(100)),
            line(AppliesTo::Total, dec!(40), dec!(0)),
        ];
        let summary = AllocationEngine::default().summarize(dec!(1100), dec!(0), &lines);

        assert_eq!(summary.line_totals(), vec![dec!(700), dec!(400)]);
        assert!(summary.matches_deal_value);
    }

    #[test]
    fn test_simple_model_ignores_flag_and_fixed_in_base() {
        let lines = vec![
            line(AppliesTo::Deposit, dec!(10), dec!(0)),
            line(AppliesTo::Deposit, dec!(10), dec!(0)).with_subtract_other_deposit(true),
            line(AppliesTo::Total, dec!(50), dec!(20)),
        ];
        let summary = AllocationEngine::new(CalculationModel::Simple).summarize(dec!(1000), dec!(50), &lines);

        assert_eq!(summary.line_totals(), vec![dec!(50), dec!(50), dec!(520)]);
    }

    #[test]
    fn test_remaining_lines_are_honoured_in_advanced_model() {
        let lines = vec![
            line(AppliesTo::Remaining, dec!(10), dec!(0)),
            line(AppliesTo::Total, dec!(100), dec!(0)),
        ];
        let summary = AllocationEngine::default().summarize(dec!(1000), dec!(20), &lines);

        assert_eq!(summary.lines[0].base_amount, dec!(800));
        assert_eq!(summary.lines[0].total, dec!(80));
        assert_eq!(summary.lines[0].remaining_amount, dec!(80));
        assert_eq!(summary.lines[1].base_amount, dec!(920));
        assert!(summary.matches_deal_value);
    }

    #[test]
    fn test_model_parsing() {
        assert_eq!("Simple".parse::<CalculationModel>().unwrap(), CalculationModel::Simple);
        assert_eq!(" advanced ".parse::<CalculationModel>().unwrap(), CalculationModel::Advanced);
        assert!(matches!(
            "legacy".parse::<CalculationModel>(),
            Err(CommissionError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AllocationEngine>();
        assert_send_sync::<AllocationSummary>();
    }
}
