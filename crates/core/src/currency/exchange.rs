//! Currency pair types and logic.

use std::fmt;

use monetary_shared::{MonetaryError, MonetaryResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Currency;

/// Exchange ratio between two currencies: 1 base = `ratio` counter.
///
/// Two pairs are equal when they join the same two currencies, in either
/// order; the ratio is not compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPair")]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
    ratio: Decimal,
}

/// Serialized form of [`CurrencyPair`], validated on the way in.
#[derive(Deserialize)]
struct RawPair {
    base: Currency,
    counter: Currency,
    ratio: Decimal,
}

impl TryFrom<RawPair> for CurrencyPair {
    type Error = MonetaryError;

    fn try_from(raw: RawPair) -> MonetaryResult<Self> {
        Self::new(raw.base, raw.counter, raw.ratio)
    }
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the ratio is not positive, either side is the
    /// null currency, or both sides are the same currency.
    pub fn new(base: Currency, counter: Currency, ratio: Decimal) -> MonetaryResult<Self> {
        if ratio <= Decimal::ZERO {
            return Err(MonetaryError::InvalidArgument(format!(
                "ratio must be positive; given: {ratio}"
            )));
        }
        if base.is_null() || counter.is_null() {
            return Err(MonetaryError::InvalidArgument(
                "a currency pair needs two real currencies".to_string(),
            ));
        }
        if base == counter {
            return Err(MonetaryError::InvalidArgument(format!(
                "cannot pair {} with itself",
                base.code()
            )));
        }

        Ok(Self {
            base,
            counter,
            ratio,
        })
    }

    /// Convenience constructor from codes.
    pub fn of(base: &str, counter: &str, ratio: Decimal) -> MonetaryResult<Self> {
        Self::new(Currency::from_code(base)?, Currency::from_code(counter)?, ratio)
    }

    /// The base currency.
    #[must_use]
    pub const fn base(&self) -> &Currency {
        &self.base
    }

    /// The counter currency.
    #[must_use]
    pub const fn counter(&self) -> &Currency {
        &self.counter
    }

    /// Counter units per base unit.
    #[must_use]
    pub const fn ratio(&self) -> Decimal {
        self.ratio
    }

    /// Returns true if `currency` is either side of the pair.
    #[must_use]
    pub fn has(&self, currency: &Currency) -> bool {
        self.base == *currency || self.counter == *currency
    }

    /// Returns true if the pair joins `a` and `b`, in either order.
    #[must_use]
    pub fn joins(&self, a: &Currency, b: &Currency) -> bool {
        (self.base == *a && self.counter == *b) || (self.base == *b && self.counter == *a)
    }

    /// Units of the other currency per unit of `from`.
    ///
    /// # Errors
    ///
    /// `NoSuitableExchangeRate` when `from` is not part of the pair;
    /// `Overflow` if the reciprocal ratio is out of range.
    pub fn rate_from(&self, from: &Currency) -> MonetaryResult<Decimal> {
        if *from == self.base {
            Ok(self.ratio)
        } else if *from == self.counter {
            self.reciprocal()
        } else {
            Err(MonetaryError::NoSuitableExchangeRate {
                from: from.label(),
                to: format!("{}/{}", self.base.code(), self.counter.code()),
            })
        }
    }

    /// Returns the inverse pair.
    ///
    /// # Errors
    ///
    /// `Overflow` if the reciprocal ratio is out of range.
    pub fn inverse(&self) -> MonetaryResult<Self> {
        Ok(Self {
            base: self.counter.clone(),
            counter: self.base.clone(),
            ratio: self.reciprocal()?,
        })
    }

    fn reciprocal(&self) -> MonetaryResult<Decimal> {
        Decimal::ONE
            .checked_div(self.ratio)
            .ok_or_else(|| MonetaryError::Overflow(format!("1 / {}", self.ratio)))
    }
}

impl PartialEq for CurrencyPair {
    fn eq(&self, other: &Self) -> bool {
        self.joins(&other.base, &other.counter)
    }
}

impl Eq for CurrencyPair {}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.base.code(), self.counter.code(), self.ratio)
    }
}
