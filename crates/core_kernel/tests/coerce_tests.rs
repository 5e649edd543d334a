//! Tests for lenient JSON coercion
//!
//! Coercion must accept anything a half-edited form can produce and degrade
//! to a neutral value instead of failing.

use core_kernel::{coerce_decimal, coerce_flag, coerce_text, LineId, DealId, MAX_MAGNITUDE};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

mod decimals {
    use super::*;

    #[test]
    fn test_form_field_values() {
        let cases = [
            (json!(0), dec!(0)),
            (json!(35), dec!(35)),
            (json!("35"), dec!(35)),
            (json!("12.50"), dec!(12.5)),
            (json!("-4.2"), dec!(-4.2)),
            (json!("2.5e1"), dec!(25)),
            (json!(""), dec!(0)),
            (json!("   "), dec!(0)),
            (json!("abc"), dec!(0)),
            (json!("12abc"), dec!(0)),
            (json!(null), dec!(0)),
        ];

        for (input, expected) in cases {
            assert_eq!(coerce_decimal(&input), expected, "input {input}");
        }
    }

    #[test]
    fn test_large_values_keep_sign() {
        assert_eq!(coerce_decimal(&json!(5e15)), MAX_MAGNITUDE);
        assert_eq!(coerce_decimal(&json!(-5e15)), -MAX_MAGNITUDE);
    }
}

mod identifiers {
    use super::*;

    #[test]
    fn test_line_and_deal_prefixes() {
        assert_eq!(LineId::prefix(), "line");
        assert_eq!(DealId::prefix(), "deal");
        assert!(DealId::generate().as_str().starts_with("deal-"));
    }

    #[test]
    fn test_text_ids_from_numbers() {
        let id = coerce_text(&json!(42)).map(LineId::from);
        assert_eq!(id, Some(LineId::new("42")));
    }
}

fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn coercion_is_total_and_bounded(value in any_json()) {
        let coerced = coerce_decimal(&value);
        prop_assert!(coerced.abs() <= MAX_MAGNITUDE);
        let _ = coerce_flag(&value);
        let _ = coerce_text(&value);
    }

    #[test]
    fn numeric_strings_match_numbers(minor in -10_000_000i64..10_000_000i64) {
        let value = Decimal::new(minor, 2);
        prop_assert_eq!(coerce_decimal(&json!(value.to_string())), value);
    }
}
