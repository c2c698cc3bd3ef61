//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` and every operation is checked.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use monetary_shared::{MonetaryError, MonetaryResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocation::AllocationUtil;
use super::operand::Operand;
use super::policy::{NumericPolicy, default_policy};
use crate::currency::Currency;

/// Represents a monetary amount with currency.
///
/// Values are immutable: every operation returns a new `Money` that keeps the
/// numeric policy of the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
    #[serde(skip, default = "default_policy")]
    policy: Arc<dyn NumericPolicy>,
}

impl Money {
    /// Creates a new Money instance using the default numeric policy.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self::with_policy(amount, currency, default_policy())
    }

    /// Creates a new Money instance bound to a numeric policy.
    #[must_use]
    pub fn with_policy(amount: Decimal, currency: Currency, policy: Arc<dyn NumericPolicy>) -> Self {
        Self {
            amount,
            currency,
            policy,
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Zero in the null currency; absorbs into any currency on `add`.
    #[must_use]
    pub fn null() -> Self {
        Self::zero(Currency::null())
    }

    /// Convenience factory: `Money::of("USD", dec!(5))`.
    pub fn of(code: &str, amount: Decimal) -> MonetaryResult<Self> {
        Ok(Self::new(amount, Currency::from_code(code)?))
    }

    /// The amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The numeric policy results are computed with.
    #[must_use]
    pub fn policy(&self) -> &Arc<dyn NumericPolicy> {
        &self.policy
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is less than zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if both currencies are compatible.
    #[must_use]
    pub fn has_same_currency(&self, other: &Self) -> bool {
        self.currency.accepts(&other.currency)
    }

    /// Returns true if the currencies are compatible and the amounts equal.
    #[must_use]
    pub fn has_same_amount(&self, other: &Self) -> bool {
        self.has_same_currency(other) && self.amount == other.amount
    }

    /// Adds `other`.
    ///
    /// Currencies must be compatible unless either side is zero; the result
    /// takes the currency of the non-zero operand.
    pub fn add(&self, other: &Self) -> MonetaryResult<Self> {
        self.require_summable(other)?;
        let amount = self.policy.add(self.amount, other.amount)?;
        Ok(self.derive(amount, self.pick_currency(other)))
    }

    /// Subtracts `other`.
    ///
    /// Same currency rule as [`Money::add`]. Subtracting from zero yields the
    /// negated subtrahend in the subtrahend's currency.
    pub fn subtract(&self, other: &Self) -> MonetaryResult<Self> {
        self.require_summable(other)?;
        let amount = self.policy.subtract(self.amount, other.amount)?;
        Ok(self.derive(amount, self.pick_currency(other)))
    }

    /// Multiplies by a scalar or by the amount of a same-currency `Money`.
    pub fn multiply<'a>(&self, multiplier: impl Into<Operand<'a>>) -> MonetaryResult<Self> {
        let factor = multiplier.into().resolve(self)?;
        let amount = self.policy.multiply(self.amount, factor)?;
        Ok(self.derive(amount, self.currency.clone()))
    }

    /// Like [`Money::multiply`], rounding the result with the policy.
    pub fn multiply_rounded<'a>(&self, multiplier: impl Into<Operand<'a>>) -> MonetaryResult<Self> {
        let product = self.multiply(multiplier)?;
        Ok(self.derive(self.policy.round(product.amount), product.currency))
    }

    /// Divides by a scalar or by the amount of a same-currency `Money`.
    pub fn divide<'a>(&self, divisor: impl Into<Operand<'a>>) -> MonetaryResult<Self> {
        let divisor = divisor.into().resolve(self)?;
        if divisor.is_zero() {
            return Err(MonetaryError::DivisionByZero);
        }
        let amount = self.policy.divide(self.amount, divisor)?;
        Ok(self.derive(amount, self.currency.clone()))
    }

    /// Like [`Money::divide`], rounding the result with the policy.
    pub fn divide_rounded<'a>(&self, divisor: impl Into<Operand<'a>>) -> MonetaryResult<Self> {
        let quotient = self.divide(divisor)?;
        Ok(self.derive(self.policy.round(quotient.amount), quotient.currency))
    }

    /// Returns the amount negated.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.derive(-self.amount, self.currency.clone())
    }

    /// Returns the absolute amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.derive(self.amount.abs(), self.currency.clone())
    }

    /// Compares amounts. Requires compatible currencies even for zero values.
    pub fn compare(&self, other: &Self) -> MonetaryResult<Ordering> {
        self.require_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// `self > other`
    pub fn greater_than(&self, other: &Self) -> MonetaryResult<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// `self < other`
    pub fn less_than(&self, other: &Self) -> MonetaryResult<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Splits the amount proportionally to `ratios` without losing or gaining
    /// a minor unit. Leftover units go to the first parts.
    ///
    /// The minor unit is the last decimal place the amount actually uses, so
    /// `46` splits in whole units and `0.05` in hundredths; trailing zeros do
    /// not count and equal amounts split the same way.
    pub fn allocate(&self, ratios: &[Decimal], rounding: bool) -> MonetaryResult<Vec<Self>> {
        self.allocate_at(ratios, AllocationUtil::decimal_places_of(self.amount), rounding)
    }

    /// Like [`Money::allocate`], with the minor unit fixed at
    /// `10^-decimal_places` (e.g. 2 for cents).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the amount has more decimal places than that.
    pub fn allocate_at(
        &self,
        ratios: &[Decimal],
        decimal_places: u32,
        rounding: bool,
    ) -> MonetaryResult<Vec<Self>> {
        let shares = AllocationUtil::allocate_by_ratios(
            self.policy.as_ref(),
            self.amount,
            ratios,
            decimal_places,
            rounding,
        )?;
        Ok(self.derive_all(shares))
    }

    /// Splits the amount into `count` equal parts.
    pub fn allocate_to(&self, count: usize) -> MonetaryResult<Vec<Self>> {
        let shares = AllocationUtil::allocate_equal(
            self.policy.as_ref(),
            self.amount,
            count,
            AllocationUtil::decimal_places_of(self.amount),
        )?;
        Ok(self.derive_all(shares))
    }

    fn derive_all(&self, shares: Vec<Decimal>) -> Vec<Self> {
        shares
            .into_iter()
            .map(|share| self.derive(share, self.currency.clone()))
            .collect()
    }

    /// New value sharing this value's policy.
    pub(crate) fn derive(&self, amount: Decimal, currency: Currency) -> Self {
        Self::with_policy(amount, currency, Arc::clone(&self.policy))
    }

    pub(crate) fn require_same_currency(&self, other: &Self) -> MonetaryResult<()> {
        if self.has_same_currency(other) {
            Ok(())
        } else {
            Err(MonetaryError::different_currencies(
                self.currency.label(),
                other.currency.label(),
            ))
        }
    }

    fn require_summable(&self, other: &Self) -> MonetaryResult<()> {
        if self.is_zero() || other.is_zero() {
            return Ok(());
        }
        self.require_same_currency(other)
    }

    // A zero operand or the null currency never decides the result currency.
    fn pick_currency(&self, other: &Self) -> Currency {
        if self.currency.is_null() || (self.is_zero() && !other.currency.is_null()) {
            other.currency.clone()
        } else {
            self.currency.clone()
        }
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.label())
    }
}
