//! Commission Allocation Domain
//!
//! This crate splits a deal value among an ordered list of commission lines.
//! Every line takes a percentage of some base plus a fixed amount, and the
//! summary reports whether the lines add up to the deal value.
//!
//! # Key Concepts
//!
//! - **Deal value**: the total monetary amount being split
//! - **Deposit**: a configured percentage of the deal value paid upfront
//! - **Remaining**: deal value minus deposit
//! - **Commission line**: one recipient's share (percent + fixed + base selector)
//! - **Base**: the amount a line's percentage is applied to
//! - **Net deposit fee**: a deposit line flagged `substractOtherDepostit`, whose
//!   base is the deposit after the plain deposit fees have been taken
//!
//! # Calculation Models
//!
//! - [`CalculationModel::Advanced`] (default): cascading bases, where deposit
//!   fees reduce what net deposit fees and total-scoped lines see
//! - [`CalculationModel::Simple`]: each line's base is picked independently
//!
//! # Example
//!
//! ```rust
//! use domain_commission::compute_summary;
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//!
//! let summary = compute_summary(
//!     &json!(1000),
//!     &json!(20),
//!     &json!([
//!         {"name": "Partner A", "appliesTo": "total", "percent": 65},
//!         {"name": "Partner B", "appliesTo": "total", "percent": 35},
//!     ]),
//! );
//!
//! assert_eq!(summary.deposit_amount, dec!(200));
//! assert!(summary.matches_deal_value);
//! ```
//!
//! The engine never fails and never enforces balance: callers decide what to
//! do with [`AllocationSummary::matches_deal_value`].

pub mod line;
pub mod split;
pub mod engine;
pub mod summary;
pub mod stored;
pub mod merge;
pub mod session;
pub mod error;

pub use line::{AppliesTo, CommissionLineConfig, sanitize, default_lines, ensure_config};
pub use split::DepositSplit;
pub use engine::{AllocationEngine, CalculationModel, CascadeBases, compute_summary, compute_summary_with};
pub use summary::{AllocationSummary, CommissionLineResult};
pub use stored::{StoredCommission, StoredFormat};
pub use merge::{LineSource, MergedGroup, MergedLine, SubDeal, SubDealTotals, merge_with_sub_deals, parse_sub_deal_ids};
pub use session::{ConfigSnapshot, EditSession, LineEdit};
pub use error::CommissionError;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest difference between the deal value and the disbursed total that
/// still counts as balanced
pub const MATCH_TOLERANCE: Decimal = dec!(0.01);

/// Returns true when `total` matches `deal_value` within [`MATCH_TOLERANCE`]
///
/// # Arguments
///
/// * `deal_value` - The amount being split
/// * `total` - The sum of all line totals
pub fn is_balanced(deal_value: Decimal, total: Decimal) -> bool {
    deal_value.saturating_sub(total).abs() < MATCH_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_within_tolerance() {
        assert!(is_balanced(dec!(1000), dec!(1000)));
        assert!(is_balanced(dec!(1000), dec!(999.995)));
        assert!(!is_balanced(dec!(1000), dec!(999.99)));
        assert!(!is_balanced(dec!(1000), dec!(950)));
    }

    #[test]
    fn test_empty_deal_is_balanced_with_nothing_disbursed() {
        assert!(is_balanced(Decimal::ZERO, Decimal::ZERO));
    }
}
