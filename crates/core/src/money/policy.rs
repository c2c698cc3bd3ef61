//! Numeric policy: the arithmetic backend behind every `Money` operation.
//!
//! A policy is injected into each `Money` value instead of being a
//! process-wide hook. Results of an operation keep the policy of the
//! receiving value.

use std::fmt;
use std::sync::Arc;

use monetary_shared::{MonetaryConfig, MonetaryError, MonetaryResult, RoundingConfig, RoundingMode};
use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};

/// Exact arithmetic and rounding on decimal amounts.
pub trait NumericPolicy: fmt::Debug + Send + Sync {
    /// `a + b`
    fn add(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal>;

    /// `a - b`
    fn subtract(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal>;

    /// `a * b`
    fn multiply(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal>;

    /// `a / b`, failing with `DivisionByZero` when `b` is zero.
    fn divide(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal>;

    /// Rounds `value` to `dp` decimal places.
    fn round_dp(&self, value: Decimal, dp: u32) -> Decimal;

    /// Decimal places kept by [`NumericPolicy::round`].
    fn precision(&self) -> u32;

    /// Rounds `value` to the policy's precision.
    fn round(&self, value: Decimal) -> Decimal {
        self.round_dp(value, self.precision())
    }
}

/// Default policy: checked `rust_decimal` arithmetic plus configurable
/// midpoint rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalPolicy {
    rounding: RoundingConfig,
}

impl DecimalPolicy {
    /// Creates a policy with the given rounding settings.
    #[must_use]
    pub const fn new(rounding: RoundingConfig) -> Self {
        Self { rounding }
    }

    /// Creates a policy from loaded configuration.
    #[must_use]
    pub const fn from_config(config: &MonetaryConfig) -> Self {
        Self::new(config.rounding)
    }

    /// The configured midpoint strategy.
    #[must_use]
    pub const fn mode(&self) -> RoundingMode {
        self.rounding.mode
    }
}

impl NumericPolicy for DecimalPolicy {
    fn add(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal> {
        a.checked_add(b)
            .ok_or_else(|| MonetaryError::Overflow(format!("{a} + {b}")))
    }

    fn subtract(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal> {
        a.checked_sub(b)
            .ok_or_else(|| MonetaryError::Overflow(format!("{a} - {b}")))
    }

    fn multiply(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal> {
        a.checked_mul(b)
            .ok_or_else(|| MonetaryError::Overflow(format!("{a} * {b}")))
    }

    fn divide(&self, a: Decimal, b: Decimal) -> MonetaryResult<Decimal> {
        if b.is_zero() {
            return Err(MonetaryError::DivisionByZero);
        }
        a.checked_div(b)
            .ok_or_else(|| MonetaryError::Overflow(format!("{a} / {b}")))
    }

    fn round_dp(&self, value: Decimal, dp: u32) -> Decimal {
        round_with(self.rounding.mode, value, dp)
    }

    fn precision(&self) -> u32 {
        self.rounding.precision
    }
}

static DEFAULT_POLICY: Lazy<Arc<dyn NumericPolicy>> =
    Lazy::new(|| Arc::new(DecimalPolicy::default()));

/// The shared default policy (half-even, 4 decimal places).
#[must_use]
pub fn default_policy() -> Arc<dyn NumericPolicy> {
    Arc::clone(&DEFAULT_POLICY)
}

/// Rounds `value` to `dp` decimal places with the given midpoint mode.
#[must_use]
pub fn round_with(mode: RoundingMode, value: Decimal, dp: u32) -> Decimal {
    match mode {
        RoundingMode::HalfUp => {
            value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        }
        RoundingMode::HalfDown => {
            value.round_dp_with_strategy(dp, RoundingStrategy::MidpointTowardZero)
        }
        RoundingMode::HalfEven => {
            value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
        }
        RoundingMode::HalfOdd => round_half_odd(value, dp),
    }
}

// rust_decimal has no half-odd strategy: resolve exact midpoints by hand.
fn round_half_odd(value: Decimal, dp: u32) -> Decimal {
    let toward = value.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
    let away = value.round_dp_with_strategy(dp, RoundingStrategy::AwayFromZero);
    if toward == away || (value - toward).abs() != (away - value).abs() {
        return value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    }

    let mut last_digit = toward;
    last_digit.rescale(dp);
    if last_digit.mantissa() % 2 == 0 { away } else { toward }
}
