//! Multi-currency aggregate of `Money` holdings.

use std::fmt;
use std::sync::Arc;

use monetary_shared::{MonetaryError, MonetaryResult};
use rust_decimal::Decimal;
use tracing::debug;

use crate::currency::{Currency, RateTable};
use crate::money::{Addend, Monetary, Money, MoneyFactory, PolicyMoneyFactory, SlenderMoney};

/// A bag of amounts in several currencies with one nominal currency.
///
/// Holdings are kept one per currency. The bag's own money tracks the
/// holding in the nominal currency; totals across currencies go through the
/// attached [`RateTable`], and a bag without one behaves as if it had an
/// empty lenient table.
#[derive(Debug, Clone)]
pub struct MoneyBag {
    money: Money,
    holdings: Vec<Money>,
    rates: Option<Arc<RateTable>>,
    factory: Arc<dyn MoneyFactory>,
}

impl MoneyBag {
    /// Creates a bag holding `amount` in its nominal `currency`.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self::with_factory(amount, currency, Arc::new(PolicyMoneyFactory::default()))
    }

    /// Creates a bag that converts through `rates`.
    #[must_use]
    pub fn with_rates(amount: Decimal, currency: Currency, rates: Arc<RateTable>) -> Self {
        let mut bag = Self::new(amount, currency);
        bag.rates = Some(rates);
        bag
    }

    /// Creates a bag whose own values come from `factory`.
    #[must_use]
    pub fn with_factory(amount: Decimal, currency: Currency, factory: Arc<dyn MoneyFactory>) -> Self {
        let money = factory.create(amount, currency);
        Self {
            holdings: vec![money.clone()],
            money,
            rates: None,
            factory,
        }
    }

    /// Creates a bag nominated in `money`'s currency, holding `money`.
    #[must_use]
    pub fn from_money(money: Money) -> Self {
        let factory = Arc::new(PolicyMoneyFactory::new(Arc::clone(money.policy())));
        Self {
            holdings: vec![money.clone()],
            money,
            rates: None,
            factory,
        }
    }

    /// Attaches the rate table used for conversions.
    pub fn set_rates(&mut self, rates: Arc<RateTable>) {
        self.rates = Some(rates);
    }

    /// The attached rate table.
    #[must_use]
    pub fn rates(&self) -> Option<&Arc<RateTable>> {
        self.rates.as_ref()
    }

    /// The bag's own money.
    #[must_use]
    pub const fn as_money(&self) -> &Money {
        &self.money
    }

    /// The bag's own amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.money.amount()
    }

    /// The nominal currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        self.money.currency()
    }

    /// Number of holdings.
    #[must_use]
    pub fn count(&self) -> usize {
        self.holdings.len()
    }

    /// Holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Money] {
        &self.holdings
    }

    /// Returns true if a holding equal to `money` exists.
    #[must_use]
    pub fn contains_money(&self, money: &Money) -> bool {
        self.holdings.iter().any(|holding| holding == money)
    }

    /// Adds `money` to the holding it is compatible with, or as a new holding.
    ///
    /// Returns the resulting holding.
    pub fn add_money(&mut self, money: &Money) -> MonetaryResult<Money> {
        let merged = match self.position_of(money.currency()) {
            Some(index) => {
                let merged = self.holdings[index].add(money)?;
                self.holdings[index] = merged.clone();
                merged
            }
            None => {
                self.holdings.push(money.clone());
                money.clone()
            }
        };

        self.sync_nominal(&merged);
        debug!(added = %money, holding = %merged, "added money to bag");
        Ok(merged)
    }

    /// Adds the total of `other`, taken in its own nominal currency.
    pub fn add_money_bag(&mut self, other: &Self) -> MonetaryResult<Money> {
        let total = other.money_in(other.currency())?;
        self.add_money(&total)
    }

    /// Adds any monetary value that has an addend form.
    ///
    /// With `compat_mode` the value's currency must be compatible with the
    /// nominal one.
    ///
    /// # Errors
    ///
    /// `DifferentCurrencies` in compat mode, `UnsupportedOperation` for
    /// values that cannot be added (e.g. [`SlenderMoney`]).
    pub fn add(&mut self, value: &dyn Monetary, compat_mode: bool) -> MonetaryResult<Money> {
        if compat_mode && !self.currency().accepts(value.currency()) {
            return Err(MonetaryError::different_currencies(
                self.currency().label(),
                value.currency().label(),
            ));
        }

        match value.as_addend() {
            Some(Addend::Money(money)) => self.add_money(money),
            Some(Addend::Bag(bag)) => self.add_money_bag(bag),
            None => Err(MonetaryError::UnsupportedOperation(format!(
                "cannot add {} {} to a money bag",
                value.amount(),
                value.currency().label()
            ))),
        }
    }

    /// Subtracts `money` from the holding in its currency.
    ///
    /// # Errors
    ///
    /// `DifferentCurrencies` when the bag holds no compatible currency.
    pub fn subtract_money(&mut self, money: &Money) -> MonetaryResult<Money> {
        let index = self.position_of(money.currency()).ok_or_else(|| {
            MonetaryError::different_currencies(self.currency().label(), money.currency().label())
        })?;
        let result = self.holdings[index].subtract(money)?;
        self.holdings[index] = result.clone();

        self.sync_nominal(&result);
        debug!(subtracted = %money, holding = %result, "subtracted money from bag");
        Ok(result)
    }

    /// Removes the holding equal to `money`, or with `only_by_currency` the
    /// holding in `money`'s currency whatever its amount.
    ///
    /// Removing the nominal holding resets the bag's own amount to zero.
    pub fn delete_money(&mut self, money: &Money, only_by_currency: bool) -> Option<Money> {
        let index = self.holdings.iter().position(|holding| {
            if only_by_currency {
                holding.currency() == money.currency()
            } else {
                holding == money
            }
        })?;
        let removed = self.holdings.remove(index);

        if removed.currency() == self.currency() {
            self.money = self.factory.zero(self.currency().clone());
        }
        debug!(removed = %removed, "deleted money from bag");
        Some(removed)
    }

    /// Sum of every holding converted into `currency`.
    ///
    /// # Errors
    ///
    /// Conversion errors of a strict rate table; arithmetic overflow.
    pub fn money_in(&self, currency: &Currency) -> MonetaryResult<Money> {
        let empty;
        let rates = if let Some(rates) = &self.rates {
            rates.as_ref()
        } else {
            empty = RateTable::new();
            &empty
        };

        self.holdings
            .iter()
            .try_fold(self.factory.zero(currency.clone()), |total, holding| {
                if holding.currency() == currency {
                    total.add(holding)
                } else {
                    total.add(&rates.convert(holding, currency)?)
                }
            })
    }

    /// Amount of [`MoneyBag::money_in`].
    pub fn total_in(&self, currency: &Currency) -> MonetaryResult<Decimal> {
        Ok(self.money_in(currency)?.amount())
    }

    /// Unconverted amount held in `currency`; zero when there is none.
    #[must_use]
    pub fn total_of(&self, currency: &Currency) -> Decimal {
        if currency == self.currency() {
            return self.amount();
        }
        self.holdings
            .iter()
            .find(|holding| holding.currency() == currency)
            .map_or(Decimal::ZERO, Money::amount)
    }

    /// Collapses the bag's own amount to the total in its nominal currency.
    ///
    /// Holdings are left as they are.
    pub fn to_total_amount(&mut self) -> MonetaryResult<&Money> {
        let currency = self.currency().clone();
        self.to_total_amount_in(&currency)
    }

    /// Sets the bag's own money to the total in `currency`, making
    /// `currency` the nominal one.
    pub fn to_total_amount_in(&mut self, currency: &Currency) -> MonetaryResult<&Money> {
        self.money = self.money_in(currency)?;
        debug!(total = %self.money, "collapsed bag total");
        Ok(&self.money)
    }

    /// Drops every holding except the bag's own money.
    pub fn clear(&mut self) {
        self.holdings = vec![self.money.clone()];
    }

    /// Allocates the bag's own money, see [`Money::allocate`].
    pub fn allocate(&self, ratios: &[Decimal], rounding: bool) -> MonetaryResult<Vec<Money>> {
        self.money.allocate(ratios, rounding)
    }

    /// Policy-free snapshots of the holdings.
    #[must_use]
    pub fn slenderized(&self) -> Vec<SlenderMoney> {
        self.holdings.iter().map(SlenderMoney::slenderize).collect()
    }

    /// Restores `snapshots` through the bag's factory and adds them.
    pub fn add_slenderized<'a>(
        &mut self,
        snapshots: impl IntoIterator<Item = &'a SlenderMoney>,
    ) -> MonetaryResult<()> {
        for snapshot in snapshots {
            let money = snapshot.restore(self.factory.as_ref());
            self.add_money(&money)?;
        }
        Ok(())
    }

    fn position_of(&self, currency: &Currency) -> Option<usize> {
        self.holdings
            .iter()
            .position(|holding| holding.currency() == currency)
            .or_else(|| {
                self.holdings
                    .iter()
                    .position(|holding| holding.currency().accepts(currency))
            })
    }

    // The own money follows the nominal holding.
    fn sync_nominal(&mut self, holding: &Money) {
        if self.currency().accepts(holding.currency()) {
            self.money = holding.clone();
        }
    }
}

impl Monetary for MoneyBag {
    fn amount(&self) -> Decimal {
        self.money.amount()
    }

    fn currency(&self) -> &Currency {
        self.money.currency()
    }

    fn as_addend(&self) -> Option<Addend<'_>> {
        Some(Addend::Bag(self))
    }
}

impl fmt::Display for MoneyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.money)?;
        for (i, holding) in self.holdings.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{holding}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyPair;
    use rust_decimal_macros::dec;

    fn currency(code: &str) -> Currency {
        Currency::from_code(code).unwrap()
    }

    fn money(code: &str, amount: Decimal) -> Money {
        Money::of(code, amount).unwrap()
    }

    fn usd_eur_table() -> Arc<RateTable> {
        Arc::new(RateTable::from_pairs([CurrencyPair::of("USD", "EUR", dec!(2)).unwrap()]))
    }

    #[test]
    fn test_new_bag_holds_nominal_money() {
        let bag = MoneyBag::new(dec!(10), currency("USD"));
        assert_eq!(bag.count(), 1);
        assert_eq!(bag.amount(), dec!(10));
        assert_eq!(bag.holdings(), &[money("USD", dec!(10))]);
        assert!(bag.rates().is_none());
    }

    #[test]
    fn test_add_money_merges_same_currency() {
        let mut bag = MoneyBag::new(dec!(10), currency("USD"));
        let merged = bag.add_money(&money("USD", dec!(5))).unwrap();
        assert_eq!(merged, money("USD", dec!(15)));
        assert_eq!(bag.count(), 1);
        assert_eq!(bag.amount(), dec!(15));
    }

    #[test]
    fn test_add_money_new_currency() {
        let mut bag = MoneyBag::new(dec!(0), currency("EUR"));
        bag.add_money(&money("USD", dec!(10))).unwrap();
        assert_eq!(bag.count(), 2);
        assert_eq!(bag.amount(), dec!(0));
        assert_eq!(bag.total_of(&currency("USD")), dec!(10));
        assert_eq!(bag.total_of(&currency("EUR")), dec!(0));
        assert_eq!(bag.total_of(&currency("GBP")), dec!(0));
    }

    #[test]
    fn test_money_in_lenient_without_rates() {
        let mut bag = MoneyBag::new(dec!(0), currency("EUR"));
        bag.add_money(&money("USD", dec!(10))).unwrap();
        assert_eq!(bag.money_in(&currency("GBP")).unwrap(), money("GBP", dec!(0)));
        // Same-currency holdings need no rate
        assert_eq!(bag.money_in(&currency("USD")).unwrap(), money("USD", dec!(10)));
    }

    #[test]
    fn test_money_in_with_rates() {
        let mut bag = MoneyBag::with_rates(dec!(10), currency("USD"), usd_eur_table());
        bag.add_money(&money("EUR", dec!(4))).unwrap();
        assert_eq!(bag.money_in(&currency("EUR")).unwrap(), money("EUR", dec!(24)));
        assert_eq!(bag.total_in(&currency("USD")).unwrap(), dec!(12));
    }

    #[test]
    fn test_money_in_strict_table_fails() {
        let rates = Arc::new(RateTable::strict());
        let mut bag = MoneyBag::with_rates(dec!(10), currency("USD"), rates);
        bag.add_money(&money("EUR", dec!(4))).unwrap();
        let err = bag.money_in(&currency("USD")).unwrap_err();
        assert!(err.is_rate_lookup());
    }

    #[test]
    fn test_add_money_bag_uses_its_total() {
        let mut other = MoneyBag::with_rates(dec!(1), currency("USD"), usd_eur_table());
        other.add_money(&money("EUR", dec!(2))).unwrap();

        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        let merged = bag.add_money_bag(&other).unwrap();
        assert_eq!(merged, money("USD", dec!(7)));
        assert_eq!(bag.amount(), dec!(7));
    }

    #[test]
    fn test_add_dispatches_monetary_values() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add(&money("USD", dec!(1)), true).unwrap();
        let other = MoneyBag::new(dec!(2), currency("USD"));
        bag.add(&other, true).unwrap();
        assert_eq!(bag.amount(), dec!(8));
    }

    #[test]
    fn test_add_compat_mode_rejects_other_currency() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        let err = bag.add(&money("EUR", dec!(1)), true).unwrap_err();
        assert_eq!(err.error_code(), "DIFFERENT_CURRENCIES");
        // Without compat mode the value becomes a new holding
        bag.add(&money("EUR", dec!(1)), false).unwrap();
        assert_eq!(bag.count(), 2);
    }

    #[test]
    fn test_add_snapshot_is_unsupported() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        let snapshot = SlenderMoney::slenderize(&money("USD", dec!(1)));
        let err = bag.add(&snapshot, false).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_OPERATION");
    }

    #[test]
    fn test_subtract_money() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        assert_eq!(bag.subtract_money(&money("USD", dec!(2))).unwrap(), money("USD", dec!(3)));
        assert_eq!(bag.amount(), dec!(3));

        let err = bag.subtract_money(&money("EUR", dec!(1))).unwrap_err();
        assert_eq!(err.error_code(), "DIFFERENT_CURRENCIES");
    }

    #[test]
    fn test_delete_money_exact_and_by_currency() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add_money(&money("EUR", dec!(3))).unwrap();

        assert!(bag.delete_money(&money("EUR", dec!(1)), false).is_none());
        let removed = bag.delete_money(&money("EUR", dec!(1)), true).unwrap();
        assert_eq!(removed, money("EUR", dec!(3)));
        assert_eq!(bag.count(), 1);
    }

    #[test]
    fn test_delete_nominal_resets_own_amount() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        assert!(bag.contains_money(&money("USD", dec!(5))));
        bag.delete_money(&money("USD", dec!(5)), false).unwrap();
        assert_eq!(bag.amount(), dec!(0));
        assert_eq!(bag.currency().code(), "USD");
        assert_eq!(bag.count(), 0);
        assert!(!bag.contains_money(&money("USD", dec!(5))));
    }

    #[test]
    fn test_to_total_amount() {
        let mut bag = MoneyBag::with_rates(dec!(10), currency("USD"), usd_eur_table());
        bag.add_money(&money("EUR", dec!(4))).unwrap();

        assert_eq!(bag.to_total_amount().unwrap(), &money("USD", dec!(12)));
        assert_eq!(bag.amount(), dec!(12));
        assert_eq!(bag.count(), 2);

        assert_eq!(bag.to_total_amount_in(&currency("EUR")).unwrap(), &money("EUR", dec!(24)));
        assert_eq!(bag.currency().code(), "EUR");
    }

    #[test]
    fn test_clear_keeps_own_money() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add_money(&money("EUR", dec!(3))).unwrap();
        bag.clear();
        assert_eq!(bag.holdings(), &[money("USD", dec!(5))]);
    }

    #[test]
    fn test_allocate_own_money() {
        let bag = MoneyBag::new(dec!(46), currency("USD"));
        let parts = bag.allocate(&[dec!(2), dec!(3)], false).unwrap();
        assert_eq!(parts, vec![money("USD", dec!(19)), money("USD", dec!(27))]);
    }

    #[test]
    fn test_slenderized_round_trip() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add_money(&money("EUR", dec!(3))).unwrap();
        let snapshots = bag.slenderized();
        assert_eq!(snapshots.len(), 2);

        let mut restored = MoneyBag::new(dec!(0), currency("USD"));
        restored.add_slenderized(&snapshots).unwrap();
        assert_eq!(restored.holdings(), bag.holdings());
        assert_eq!(restored.amount(), dec!(5));
    }

    #[test]
    fn test_null_money_is_absorbed() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add_money(&Money::null()).unwrap();
        assert_eq!(bag.count(), 1);
        assert_eq!(bag.amount(), dec!(5));
    }

    #[test]
    fn test_display() {
        let mut bag = MoneyBag::new(dec!(5), currency("USD"));
        bag.add_money(&money("EUR", dec!(3))).unwrap();
        assert_eq!(bag.to_string(), "5 USD [5 USD, 3 EUR]");
    }
}
