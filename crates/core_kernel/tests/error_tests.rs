//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::parse_amount;

#[test]
fn test_core_error_parse() {
    let error = CoreError::parse("not a number");

    match error {
        CoreError::Parse(msg) => assert_eq!(msg, "not a number"),
    }
}

#[test]
fn test_parse_amount_error_display() {
    let error = parse_amount("12 apples").unwrap_err();
    let display = format!("{}", error);

    assert!(display.contains("Parse error"));
    assert!(display.contains("12 apples"));
}
