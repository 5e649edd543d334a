//! Property-Based Test Generators
//!
//! Provides proptest strategies for deal amounts, line configurations and
//! arbitrary JSON of the kind a stored CRM field can hold.

use domain_commission::AppliesTo;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Strategy for deal values from 0.00 to 10,000,000.00
pub fn deal_value_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for percentages from 0% to 100% with two decimals
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for deposit percentages, including out-of-range values
pub fn deposit_percent_strategy() -> impl Strategy<Value = Decimal> {
    (-5000i64..=15000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for fixed amounts from 0.00 to 5,000.00
pub fn fixed_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

pub fn applies_to_strategy() -> impl Strategy<Value = AppliesTo> {
    prop_oneof![
        Just(AppliesTo::Total),
        Just(AppliesTo::Deposit),
        Just(AppliesTo::Remaining),
    ]
}

/// Strategy for a well-formed raw line entry
pub fn line_json_strategy() -> impl Strategy<Value = Value> {
    (
        "[A-Za-z ]{0,12}",
        applies_to_strategy(),
        percentage_strategy(),
        fixed_amount_strategy(),
        any::<bool>(),
    )
        .prop_map(|(name, applies_to, percent, fixed, flag)| {
            json!({
                "name": name,
                "appliesTo": applies_to.as_str(),
                "percent": percent,
                "fixed": fixed,
                "substractOtherDepostit": flag,
            })
        })
}

/// Strategy for numbers at and beyond the accepted magnitude bound
pub fn extreme_magnitude_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("1e12")),
        Just(json!("-1e12")),
        Just(json!(1.0e12)),
        Just(json!("999999999999.99")),
        Just(json!("1e30")),
        Just(json!(-1.0e300)),
    ]
}

/// Strategy for a line entry whose percent and fixed amount are extreme
pub fn extreme_line_json_strategy() -> impl Strategy<Value = Value> {
    (
        applies_to_strategy(),
        extreme_magnitude_strategy(),
        extreme_magnitude_strategy(),
        any::<bool>(),
    )
        .prop_map(|(applies_to, percent, fixed, flag)| {
            json!({
                "appliesTo": applies_to.as_str(),
                "percent": percent,
                "fixed": fixed,
                "substractOtherDepostit": flag,
            })
        })
}

/// Strategy for a raw configuration array of well-formed entries
pub fn line_config_json_strategy(max_lines: usize) -> impl Strategy<Value = Value> {
    proptest::collection::vec(line_json_strategy(), 0..=max_lines).prop_map(Value::Array)
}

/// Strategy for any JSON value, nested up to three levels
pub fn any_json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e9f64..1.0e9f64).prop_map(|f| json!(f)),
        "[-0-9a-z .e]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map(
                prop_oneof![
                    Just("id".to_string()),
                    Just("name".to_string()),
                    Just("appliesTo".to_string()),
                    Just("percent".to_string()),
                    Just("fixed".to_string()),
                    Just("substractOtherDepostit".to_string()),
                    Just("comment".to_string()),
                    "[a-z]{1,6}",
                ],
                inner,
                0..6,
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for raw configurations mixing line-like objects with noise
pub fn messy_config_strategy() -> impl Strategy<Value = Value> {
    proptest::collection::vec(
        prop_oneof![
            3 => line_json_strategy(),
            2 => any_json_strategy(),
            1 => extreme_line_json_strategy(),
        ],
        0..8,
    )
    .prop_map(Value::Array)
}
