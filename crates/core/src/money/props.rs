//! Property-based tests for money arithmetic and allocation.
//!
//! - Property 1: Allocation Sum Invariant
//! - Property 2: Allocation Fairness
//! - Property 3: Arithmetic Consistency

use proptest::prelude::*;
use rust_decimal::prelude::*;

use super::allocation::AllocationUtil;
use super::policy::DecimalPolicy;
use super::value::Money;
use crate::currency::Currency;

/// Strategy to generate signed amounts in cents (-1,000,000.00 to 1,000,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy spanning the whole decimal range: any 96-bit mantissa, either
/// sign, scale 0 to 28.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

/// Strategy to generate 1-10 positive integer ratios.
fn ratios() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((1u32..100).prop_map(Decimal::from), 1..10)
}

fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::from_code("USD").unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Allocation Sum Invariant
    // =========================================================================

    /// Property 1.1: Shares always add back up to the total, across the full
    /// mantissa and scale range.
    #[test]
    fn prop_allocation_sum_equals_total(
        total in any_decimal(),
        ratios in ratios(),
        rounding in any::<bool>(),
    ) {
        let policy = DecimalPolicy::default();
        let places = AllocationUtil::decimal_places_of(total);
        let result = AllocationUtil::allocate_by_ratios(&policy, total, &ratios, places, rounding).unwrap();
        let sum: Decimal = result.iter().copied().sum();
        prop_assert_eq!(sum, total, "Sum of allocations ({}) must equal total ({})", sum, total);
    }

    /// Property 1.2: Trailing zeros never change how an amount splits.
    #[test]
    fn prop_allocation_ignores_representation(
        total in signed_amount(),
        ratios in ratios(),
    ) {
        let mut padded = total;
        padded.rescale(6);
        prop_assert_eq!(usd(total).allocate(&ratios, false).unwrap(), usd(padded).allocate(&ratios, false).unwrap());
    }

    /// Property 1.3: One share per ratio.
    #[test]
    fn prop_allocation_correct_count(
        total in signed_amount(),
        ratios in ratios(),
    ) {
        let parts = usd(total).allocate(&ratios, false).unwrap();
        prop_assert_eq!(parts.len(), ratios.len());
        prop_assert!(parts.iter().all(|p| p.currency().code() == "USD"));
    }

    // =========================================================================
    // Property 2: Allocation Fairness
    // =========================================================================

    /// Property 2.1: A truncated share is its truncated ideal, or one minor
    /// unit above it.
    #[test]
    fn prop_truncated_share_within_one_unit(
        total in non_negative_amount(),
        ratios in ratios(),
    ) {
        let policy = DecimalPolicy::default();
        let result = AllocationUtil::allocate_by_ratios(&policy, total, &ratios, 2, false).unwrap();
        let ratio_sum: Decimal = ratios.iter().copied().sum();
        let unit = Decimal::new(1, total.scale());

        for (share, ratio) in result.iter().zip(&ratios) {
            let ideal = (total * ratio / ratio_sum)
                .round_dp_with_strategy(total.scale(), RoundingStrategy::ToZero);
            let diff = *share - ideal;
            prop_assert!(
                diff == Decimal::ZERO || diff == unit,
                "Share {} strays from ideal {} by {}",
                share, ideal, diff
            );
        }
    }

    /// Property 2.2: Non-negative totals never produce negative shares.
    #[test]
    fn prop_allocation_non_negative(
        total in non_negative_amount(),
        ratios in ratios(),
    ) {
        let policy = DecimalPolicy::default();
        let result = AllocationUtil::allocate_by_ratios(&policy, total, &ratios, 2, false).unwrap();
        for (i, share) in result.iter().enumerate() {
            prop_assert!(*share >= Decimal::ZERO, "Allocation {} should be non-negative, got {}", i, share);
        }
    }

    // =========================================================================
    // Property 3: Arithmetic Consistency
    // =========================================================================

    /// Property 3.1: `(a + b) - b == a`
    #[test]
    fn prop_add_subtract_round_trip(
        a in signed_amount(),
        b in signed_amount(),
    ) {
        let a = usd(a);
        let b = usd(b);
        prop_assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    }

    /// Property 3.2: Addition commutes in amount.
    #[test]
    fn prop_add_commutes(
        a in signed_amount(),
        b in signed_amount(),
    ) {
        let a = usd(a);
        let b = usd(b);
        prop_assert_eq!(a.add(&b).unwrap().amount(), b.add(&a).unwrap().amount());
    }

    /// Property 3.3: Subtracting from the null zero negates.
    #[test]
    fn prop_subtract_from_zero_negates(amount in signed_amount()) {
        let money = usd(amount);
        prop_assert_eq!(Money::null().subtract(&money).unwrap(), money.negate());
    }

    /// Property 3.4: Comparison is antisymmetric.
    #[test]
    fn prop_compare_antisymmetric(
        a in signed_amount(),
        b in signed_amount(),
    ) {
        let a = usd(a);
        let b = usd(b);
        prop_assert_eq!(a.compare(&b).unwrap(), b.compare(&a).unwrap().reverse());
    }
}
