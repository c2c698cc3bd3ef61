//! Property-based tests for currency operations.
//!
//! - Property 4: Conversion Rounding
//! - Property 5: Conversion Round Trip
//! - Property 6: Rate Table Fallbacks

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::exchange::CurrencyPair;
use super::rate_table::RateTable;
use super::types::Currency;
use crate::money::Money;

/// Strategy to generate positive amounts in cents (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange ratios (0.0001 to 10000.0000).
fn positive_ratio() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate whole-number ratios (1 to 1000).
fn whole_ratio() -> impl Strategy<Value = Decimal> {
    (1i64..=1000i64).prop_map(Decimal::from)
}

fn currency(code: &str) -> Currency {
    Currency::from_code(code).unwrap()
}

fn usd_eur(ratio: Decimal) -> RateTable {
    RateTable::from_pairs([CurrencyPair::of("USD", "EUR", ratio).unwrap()])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 4: Conversion Rounding
    // =========================================================================

    /// Property 4.1: Converted amounts never carry more than 4 decimal places.
    #[test]
    fn prop_convert_rounds_to_4_decimals(
        amount in positive_amount(),
        ratio in positive_ratio(),
    ) {
        let table = usd_eur(ratio);
        let eur = table.convert(&Money::of("USD", amount).unwrap(), &currency("EUR")).unwrap();
        let usd = table.convert(&eur, &currency("USD")).unwrap();
        for result in [eur, usd] {
            prop_assert!(result.amount().scale() <= 4, "Result {} has more than 4 decimal places", result);
        }
    }

    /// Property 4.2: Positive amounts never convert to negative ones.
    #[test]
    fn prop_convert_never_negative(
        amount in positive_amount(),
        ratio in positive_ratio(),
    ) {
        let result = usd_eur(ratio)
            .convert(&Money::of("USD", amount).unwrap(), &currency("EUR"))
            .unwrap();
        prop_assert!(result.amount() >= Decimal::ZERO);
        prop_assert_eq!(result.currency().code(), "EUR");
    }

    // =========================================================================
    // Property 5: Conversion Round Trip
    // =========================================================================

    /// Property 5.1: With a whole-number ratio, base -> counter -> base is exact.
    #[test]
    fn prop_convert_round_trip(
        amount in positive_amount(),
        ratio in whole_ratio(),
    ) {
        let table = usd_eur(ratio);
        let money = Money::of("USD", amount).unwrap();
        let there = table.convert(&money, &currency("EUR")).unwrap();
        let back = table.convert(&there, &currency("USD")).unwrap();
        prop_assert_eq!(back, money);
    }

    // =========================================================================
    // Property 6: Rate Table Fallbacks
    // =========================================================================

    /// Property 6.1: A lenient table without a rate yields zero in the target.
    #[test]
    fn prop_lenient_missing_rate_is_zero(amount in positive_amount()) {
        let result = RateTable::new()
            .convert(&Money::of("USD", amount).unwrap(), &currency("GBP"))
            .unwrap();
        prop_assert!(result.is_zero());
        prop_assert_eq!(result.currency().code(), "GBP");
    }

    /// Property 6.2: A strict table without a rate always fails.
    #[test]
    fn prop_strict_missing_rate_fails(amount in positive_amount()) {
        let result = RateTable::strict().convert(&Money::of("USD", amount).unwrap(), &currency("GBP"));
        prop_assert!(result.is_err());
    }
}
