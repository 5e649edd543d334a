//! Unit tests for the Money module
//!
//! Tests cover money creation, rounding, currency handling,
//! display formats and rates.

use core_kernel::{Money, Currency, CurrencyFormat, MoneyError, round_currency};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.1235));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_currency(dec!(10.125)), dec!(10.13));
        assert_eq!(round_currency(dec!(10.135)), dec!(10.14));
        assert_eq!(round_currency(dec!(-10.125)), dec!(-10.13));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_currency(dec!(10.1249)), dec!(10.12));
    }

    #[test]
    fn test_round_to_currency_eur() {
        let m = Money::new(dec!(33.335), Currency::EUR);
        assert_eq!(m.round_to_currency().amount(), dec!(33.34));
    }

    #[test]
    fn test_round_to_currency_jpy() {
        let m = Money::new(dec!(1234.5), Currency::JPY);
        assert_eq!(m.round_to_currency().amount(), dec!(1235));
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_all_currencies_have_symbols() {
        let currencies = [
            Currency::EUR, Currency::USD, Currency::GBP,
            Currency::CHF, Currency::CAD, Currency::JPY,
        ];

        for currency in currencies {
            assert!(!currency.symbol().is_empty());
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_default_currency_is_euro() {
        assert_eq!(Currency::default(), Currency::EUR);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" eur ".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_parse_unknown_currency() {
        assert_eq!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency("XYZ".to_string()))
        );
    }
}

mod display {
    use super::*;

    #[test]
    fn test_symbol_format() {
        let m = Money::new(dec!(1234.5), Currency::EUR);
        assert_eq!(m.to_string(), "€ 1234.50");
        assert_eq!(m.format(CurrencyFormat::Symbol), "€ 1234.50");
    }

    #[test]
    fn test_code_format() {
        let m = Money::new(dec!(950), Currency::EUR);
        assert_eq!(m.format(CurrencyFormat::Code), "950.00 EUR");
    }

    #[test]
    fn test_french_format_groups_thousands() {
        let m = Money::new(dec!(1234567.891), Currency::EUR);
        assert_eq!(m.format(CurrencyFormat::French), "1\u{202f}234\u{202f}567,89\u{a0}€");
    }

    #[test]
    fn test_french_format_negative() {
        let m = Money::new(dec!(-50), Currency::EUR);
        assert_eq!(m.format(CurrencyFormat::French), "-50,00\u{a0}€");
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        let m = Money::new(dec!(-0.001), Currency::EUR);
        assert_eq!(m.format(CurrencyFormat::Code), "0.00 EUR");
    }

    #[test]
    fn test_jpy_has_no_fraction() {
        let m = Money::new(dec!(12345), Currency::JPY);
        assert_eq!(m.format(CurrencyFormat::French), "12\u{202f}345\u{a0}¥");
    }
}

mod rate {
    use core_kernel::money::Rate;
    use super::*;

    #[test]
    fn test_rate_of_amount() {
        let rate = Rate::from_percentage(dec!(10));
        assert_eq!(rate.of(dec!(450)), dec!(45));
    }

    #[test]
    fn test_rate_above_one_hundred_percent() {
        let rate = Rate::from_percentage(dec!(150));
        assert_eq!(rate.of(dec!(200)), dec!(300));
    }

    #[test]
    fn test_fractional_rate() {
        let rate = Rate::from_percentage(dec!(12.5));
        assert_eq!(rate.of(dec!(80)), dec!(10));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_money_json_roundtrip() {
        let m = Money::new(dec!(100.50), Currency::EUR);
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_amount_is_an_exact_json_number() {
        let m = Money::new(dec!(100.50), Currency::EUR);
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"amount":100.50,"currency":"EUR"}"#);
    }

    #[test]
    fn test_currency_json() {
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), "\"EUR\"");
    }
}
