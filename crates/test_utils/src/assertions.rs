//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for allocation summaries that give
//! more meaningful error messages than standard assertions.

use core_kernel::round_currency;
use domain_commission::{AllocationSummary, MATCH_TOLERANCE};
use rust_decimal::Decimal;

/// Asserts that a value carries no more than currency precision
pub fn assert_currency_precise(value: Decimal) {
    assert_eq!(
        round_currency(value),
        value,
        "{} is not rounded to currency precision",
        value
    );
}

/// Asserts that a summary's lines add up to its deal value
pub fn assert_balanced(summary: &AllocationSummary) {
    assert!(
        summary.matches_deal_value,
        "Expected balanced summary: deal value {}, disbursed {}, difference {}",
        summary.deal_value,
        summary.total_disbursed,
        summary.difference_to_deal_value
    );
}

/// Asserts that a summary's lines do not add up to its deal value
pub fn assert_unbalanced(summary: &AllocationSummary) {
    assert!(
        !summary.matches_deal_value,
        "Expected unbalanced summary, but {} disbursed matches deal value {}",
        summary.total_disbursed,
        summary.deal_value
    );
}

/// Asserts the relations every summary must satisfy
///
/// - deposit and remaining add up to the deal value
/// - the disbursed total is the sum of line totals
/// - the difference and the balance flag agree with the disbursed total
/// - every emitted amount is rounded to currency precision
pub fn assert_summary_consistent(summary: &AllocationSummary) {
    assert_eq!(
        summary.deposit_amount + summary.remaining_amount,
        summary.deal_value,
        "Deposit {} and remaining {} do not add up to deal value {}",
        summary.deposit_amount,
        summary.remaining_amount,
        summary.deal_value
    );

    let line_sum = summary
        .lines
        .iter()
        .map(|l| l.total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    assert_eq!(
        summary.total_disbursed,
        round_currency(line_sum),
        "Disbursed total {} is not the sum of line totals {}",
        summary.total_disbursed,
        line_sum
    );
    assert_eq!(
        summary.difference_to_deal_value,
        round_currency(summary.deal_value.saturating_sub(summary.total_disbursed))
    );
    assert_eq!(
        summary.matches_deal_value,
        summary.deal_value.saturating_sub(summary.total_disbursed).abs() < MATCH_TOLERANCE
    );

    for line in &summary.lines {
        assert_currency_precise(line.percent_amount);
        assert_currency_precise(line.total);
        assert_currency_precise(line.base_amount);
    }
    assert_eq!(summary.lines.len(), summary.commission_config.len());
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
