//! The common face of single amounts and bags.

use rust_decimal::Decimal;

use super::value::Money;
use crate::bag::MoneyBag;
use crate::currency::Currency;

/// Something a bag can be asked to add.
#[derive(Debug, Clone, Copy)]
pub enum Addend<'a> {
    /// A single amount.
    Money(&'a Money),
    /// Another bag; added as its total in its own currency.
    Bag(&'a MoneyBag),
}

/// Read access shared by every monetary value.
pub trait Monetary {
    /// The amount, in [`Monetary::currency`].
    fn amount(&self) -> Decimal;

    /// The currency of [`Monetary::amount`].
    fn currency(&self) -> &Currency;

    /// Returns true if the amount is zero.
    fn is_zero(&self) -> bool {
        self.amount().is_zero()
    }

    /// How a bag adds this value; `None` when it cannot be added.
    fn as_addend(&self) -> Option<Addend<'_>> {
        None
    }
}

impl Monetary for Money {
    fn amount(&self) -> Decimal {
        Self::amount(self)
    }

    fn currency(&self) -> &Currency {
        Self::currency(self)
    }

    fn as_addend(&self) -> Option<Addend<'_>> {
        Some(Addend::Money(self))
    }
}
