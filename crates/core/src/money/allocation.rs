//! Amount allocation by ratios.
//!
//! Splits an amount into proportional parts whose sum EXACTLY equals the
//! original amount (no minor unit lost or gained). The split happens at an
//! explicit number of decimal places: at 0 the minor unit is 1, at 2 it is
//! 0.01.
//!
//! The method works in whole minor units (`i128`), so no intermediate
//! product is rounded:
//! 1. Express the amount and the ratios as integers
//! 2. Each share is `units * ratio / sum(ratios)`, truncated toward zero (or
//!    rounded, on request)
//! 3. The remainder (units - sum of shares) is handed out one unit at a time,
//!    first share first

use std::cmp::Ordering;

use monetary_shared::{MonetaryError, MonetaryResult};
use rust_decimal::Decimal;

use super::policy::NumericPolicy;

/// Finest unit an allocation can work in.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Allocation utility for distributing amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` proportionally to `ratios`, in minor units of
    /// `10^-decimal_places`.
    ///
    /// With `rounding == false` each share is truncated toward zero, so every
    /// share ends within one minor unit above its truncated ideal. With
    /// `rounding == true` shares are rounded with the policy's midpoint mode
    /// and the (possibly negative) remainder is settled the same way.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `ratios` is empty, holds a non-positive ratio,
    /// or `total` is finer than the minor unit; `Overflow` if the minor-unit
    /// products leave `i128` range or a share leaves decimal range.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use monetary_core::money::{AllocationUtil, DecimalPolicy};
    ///
    /// let policy = DecimalPolicy::default();
    /// let parts = AllocationUtil::allocate_by_ratios(&policy, dec!(46), &[dec!(2), dec!(3)], 0, false).unwrap();
    /// assert_eq!(parts, vec![dec!(19), dec!(27)]);
    /// ```
    pub fn allocate_by_ratios(
        policy: &dyn NumericPolicy,
        total: Decimal,
        ratios: &[Decimal],
        decimal_places: u32,
        rounding: bool,
    ) -> MonetaryResult<Vec<Decimal>> {
        if ratios.is_empty() {
            return Err(MonetaryError::InvalidArgument(
                "at least one ratio is required".to_string(),
            ));
        }
        if let Some(ratio) = ratios.iter().find(|r| **r <= Decimal::ZERO) {
            return Err(MonetaryError::InvalidArgument(format!(
                "ratios must be positive; given: {ratio}"
            )));
        }
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(MonetaryError::InvalidArgument(format!(
                "cannot allocate at {decimal_places} decimal places"
            )));
        }

        let units = to_units(total, decimal_places)?;
        let ratio_scale = ratios
            .iter()
            .map(|r| r.normalize().scale())
            .max()
            .unwrap_or(0);
        let weights = ratios
            .iter()
            .map(|r| to_units(*r, ratio_scale))
            .collect::<MonetaryResult<Vec<_>>>()?;
        let weight_sum = weights
            .iter()
            .try_fold(0i128, |acc, w| acc.checked_add(*w))
            .ok_or_else(|| MonetaryError::Overflow(format!("sum of ratios {ratios:?}")))?;

        let mut shares = weights
            .iter()
            .map(|weight| {
                let product = units
                    .checked_mul(*weight)
                    .ok_or_else(|| MonetaryError::Overflow(format!("{total} * {weight}")))?;
                let quotient = product / weight_sum;
                if rounding {
                    let adjustment =
                        round_adjustment(policy, quotient, product % weight_sum, weight_sum)?;
                    Ok(quotient + adjustment)
                } else {
                    Ok(quotient)
                }
            })
            .collect::<MonetaryResult<Vec<_>>>()?;

        let allocated = shares
            .iter()
            .try_fold(0i128, |acc, s| acc.checked_add(*s))
            .ok_or_else(|| MonetaryError::Overflow(format!("sum of shares of {total}")))?;
        let remainder = units - allocated;

        // Each share is within one unit of its ideal, so fewer units than shares remain
        let leftover = usize::try_from(remainder.unsigned_abs())
            .ok()
            .filter(|n| *n <= shares.len())
            .ok_or_else(|| {
                MonetaryError::Overflow(format!("remainder of {remainder} units splitting {total}"))
            })?;
        let step = remainder.signum();
        for share in shares.iter_mut().take(leftover) {
            *share += step;
        }

        shares
            .into_iter()
            .map(|share| {
                Decimal::try_from_i128_with_scale(share, decimal_places).map_err(|_| {
                    MonetaryError::Overflow(format!("share of {share} units splitting {total}"))
                })
            })
            .collect()
    }

    /// Allocate `total` equally across `count` recipients.
    ///
    /// Earlier recipients receive the leftover units.
    pub fn allocate_equal(
        policy: &dyn NumericPolicy,
        total: Decimal,
        count: usize,
        decimal_places: u32,
    ) -> MonetaryResult<Vec<Decimal>> {
        if count == 0 {
            return Err(MonetaryError::InvalidArgument(
                "cannot allocate to zero recipients".to_string(),
            ));
        }
        Self::allocate_by_ratios(policy, total, &vec![Decimal::ONE; count], decimal_places, false)
    }

    /// Decimal places a value actually uses, ignoring trailing zeros.
    ///
    /// `1` and `1.00` both use none, so equal amounts split the same way.
    #[must_use]
    pub fn decimal_places_of(value: Decimal) -> u32 {
        value.normalize().scale()
    }
}

/// `value` as a whole number of `10^-decimal_places` units.
fn to_units(value: Decimal, decimal_places: u32) -> MonetaryResult<i128> {
    let value = value.normalize();
    let scale = value.scale();
    if scale > decimal_places {
        return Err(MonetaryError::InvalidArgument(format!(
            "{value} is finer than {decimal_places} decimal places"
        )));
    }
    10i128
        .checked_pow(decimal_places - scale)
        .and_then(|factor| value.mantissa().checked_mul(factor))
        .ok_or_else(|| MonetaryError::Overflow(format!("{value} at {decimal_places} decimal places")))
}

/// Whether `quotient + remainder / divisor` rounds away from `quotient`
/// (returns the signed unit) or stays (returns 0).
///
/// The policy decides: the fraction is reduced to below, at or above one
/// half and placed after the quotient's last digit, which keeps the parity
/// that half-even and half-odd look at.
fn round_adjustment(
    policy: &dyn NumericPolicy,
    quotient: i128,
    remainder: i128,
    divisor: i128,
) -> MonetaryResult<i128> {
    if remainder == 0 {
        return Ok(0);
    }
    let magnitude = remainder.unsigned_abs();
    let fraction = match magnitude.cmp(&(divisor.unsigned_abs() - magnitude)) {
        Ordering::Less => Decimal::new(25, 2),
        Ordering::Equal => Decimal::new(5, 1),
        Ordering::Greater => Decimal::new(75, 2),
    };
    let last_digit = Decimal::try_from_i128_with_scale(quotient % 10, 0)
        .map_err(|_| MonetaryError::Overflow(format!("rounding {quotient}")))?;
    let fraction = if remainder < 0 { -fraction } else { fraction };

    if policy.round_dp(last_digit + fraction, 0) == last_digit {
        Ok(0)
    } else {
        Ok(remainder.signum())
    }
}
