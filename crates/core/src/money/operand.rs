//! Right-hand operand of `Money::multiply` and `Money::divide`.

use monetary_shared::{MonetaryError, MonetaryResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use super::value::Money;

/// A plain number or a same-currency `Money` whose amount is used as scalar.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// A plain scalar.
    Scalar(Decimal),
    /// The amount of another value; its currency must match.
    Money(&'a Money),
}

impl Operand<'_> {
    /// Resolves the operand to a scalar, checking currency compatibility
    /// against `receiver`.
    pub(crate) fn resolve(self, receiver: &Money) -> MonetaryResult<Decimal> {
        match self {
            Self::Scalar(value) => Ok(value),
            Self::Money(other) => {
                receiver.require_same_currency(other)?;
                Ok(other.amount())
            }
        }
    }
}

impl From<Decimal> for Operand<'_> {
    fn from(value: Decimal) -> Self {
        Self::Scalar(value)
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<u32> for Operand<'_> {
    fn from(value: u32) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl<'a> From<&'a Money> for Operand<'a> {
    fn from(value: &'a Money) -> Self {
        Self::Money(value)
    }
}

impl TryFrom<f64> for Operand<'_> {
    type Error = MonetaryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64(value).map(Self::Scalar).ok_or_else(|| {
            MonetaryError::InvalidArgument(format!("{value} is not a representable number"))
        })
    }
}
