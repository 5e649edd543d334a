//! Deposit / remaining split of a deal value

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{bound_magnitude, clamp_percent, round_currency, Rate};

/// A deal value divided into its deposit and remaining portions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositSplit {
    /// Deal value rounded to currency precision
    pub deal_value: Decimal,
    /// Deposit percentage clamped to `[0, 100]`
    pub deposit_percent: Decimal,
    /// `round(deal_value * deposit_percent / 100)`
    pub deposit_amount: Decimal,
    /// `round(deal_value - deposit_amount)`
    pub remaining_amount: Decimal,
}

impl DepositSplit {
    /// Splits a deal value
    ///
    /// Negative deal values are not special-cased and split like any other.
    ///
    /// # Arguments
    ///
    /// * `deal_value` - The amount being split
    /// * `deposit_percent` - Deposit percentage; clamped into `[0, 100]`
    pub fn compute(deal_value: Decimal, deposit_percent: Decimal) -> Self {
        let deal_value = round_currency(bound_magnitude(deal_value));
        let deposit_percent = clamp_percent(deposit_percent);
        let deposit_amount = round_currency(Rate::from_percentage(deposit_percent).of(deal_value));
        let remaining_amount = round_currency(deal_value - deposit_amount);

        Self {
            deal_value,
            deposit_percent,
            deposit_amount,
            remaining_amount,
        }
    }
}
