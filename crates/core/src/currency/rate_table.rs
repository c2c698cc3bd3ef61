//! Exchange rate lookup table.

use monetary_shared::{MonetaryError, MonetaryResult, RateConfig};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::conversion::convert_money;
use super::exchange::CurrencyPair;
use super::types::Currency;
use crate::money::Money;

/// Filter for [`RateTable::find_by`]. Unset sides match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCriteria {
    /// Required base currency.
    pub base: Option<Currency>,
    /// Required counter currency.
    pub counter: Option<Currency>,
}

impl PairCriteria {
    /// Matches every pair.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Requires the base currency.
    #[must_use]
    pub fn with_base(mut self, base: Currency) -> Self {
        self.base = Some(base);
        self
    }

    /// Requires the counter currency.
    #[must_use]
    pub fn with_counter(mut self, counter: Currency) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Returns true if `pair` satisfies every set side.
    #[must_use]
    pub fn matches(&self, pair: &CurrencyPair) -> bool {
        self.base.as_ref().is_none_or(|base| pair.base() == base)
            && self.counter.as_ref().is_none_or(|counter| pair.counter() == counter)
    }
}

#[derive(Debug, Default)]
struct Inner {
    pairs: Vec<CurrencyPair>,
    strict: bool,
}

/// Ordered set of currency pairs, at most one per pair of currencies.
///
/// Lookups take a read lock and mutations a write lock, so one table can be
/// shared as `Arc<RateTable>` between bags and threads.
///
/// A lenient table (the default) answers a missing rate with a fallback
/// value; a strict one fails with `NoSuitableExchangeRate`.
#[derive(Debug, Default)]
pub struct RateTable {
    inner: RwLock<Inner>,
}

impl RateTable {
    /// Creates an empty lenient table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty strict table.
    #[must_use]
    pub fn strict() -> Self {
        let table = Self::new();
        table.set_strict(true);
        table
    }

    /// Creates an empty table following the configured strictness.
    #[must_use]
    pub fn from_config(config: &RateConfig) -> Self {
        let table = Self::new();
        table.set_strict(config.strict);
        table
    }

    /// Creates a lenient table holding `pairs`; duplicates are skipped.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = CurrencyPair>) -> Self {
        let table = Self::new();
        table.replace_all(pairs);
        table
    }

    /// Returns true if missing rates are errors.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.inner.read().strict
    }

    /// Switches between strict and lenient lookups.
    pub fn set_strict(&self, strict: bool) {
        self.inner.write().strict = strict;
    }

    /// Adds `pair` unless the table already joins the same currencies.
    ///
    /// Returns false when the pair was a duplicate and was ignored.
    pub fn attach(&self, pair: CurrencyPair) -> bool {
        let mut inner = self.inner.write();
        if inner.pairs.contains(&pair) {
            debug!(pair = %pair, "duplicate currency pair ignored");
            return false;
        }
        inner.pairs.push(pair);
        true
    }

    /// Adds `pair`, overwriting an entry for the same currencies.
    ///
    /// Returns the overwritten entry.
    pub fn replace(&self, pair: CurrencyPair) -> Option<CurrencyPair> {
        let mut inner = self.inner.write();
        if let Some(index) = inner.pairs.iter().position(|existing| *existing == pair) {
            return Some(std::mem::replace(&mut inner.pairs[index], pair));
        }
        inner.pairs.push(pair);
        None
    }

    /// Removes the entry joining the same currencies as `pair`.
    pub fn detach(&self, pair: &CurrencyPair) -> Option<CurrencyPair> {
        let mut inner = self.inner.write();
        let index = inner.pairs.iter().position(|existing| existing == pair)?;
        Some(inner.pairs.remove(index))
    }

    /// Drops every entry and attaches `pairs` instead.
    pub fn replace_all(&self, pairs: impl IntoIterator<Item = CurrencyPair>) {
        let mut inner = self.inner.write();
        inner.pairs.clear();
        for pair in pairs {
            if !inner.pairs.contains(&pair) {
                inner.pairs.push(pair);
            }
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.write().pairs.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().pairs.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().pairs.is_empty()
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn pairs(&self) -> Vec<CurrencyPair> {
        self.inner.read().pairs.clone()
    }

    /// First entry joining `from` and `to`, in either direction.
    ///
    /// # Errors
    ///
    /// `NoSuitablePair` when no entry joins them.
    pub fn find_by_currency(&self, from: &Currency, to: &Currency) -> MonetaryResult<CurrencyPair> {
        self.inner
            .read()
            .pairs
            .iter()
            .find(|pair| pair.joins(from, to))
            .cloned()
            .ok_or_else(|| MonetaryError::NoSuitablePair {
                base: from.label(),
                counter: to.label(),
            })
    }

    /// Every entry matching `criteria`, in insertion order.
    #[must_use]
    pub fn find_by(&self, criteria: &PairCriteria) -> Vec<CurrencyPair> {
        self.inner
            .read()
            .pairs
            .iter()
            .filter(|pair| criteria.matches(pair))
            .cloned()
            .collect()
    }

    /// Converts `money` into `to`.
    ///
    /// Without a matching entry a strict table fails; a lenient one returns
    /// `money` unchanged when it is already in `to` and zero in `to` otherwise.
    ///
    /// # Errors
    ///
    /// `NoSuitableExchangeRate` on a strict table without a matching entry.
    pub fn convert(&self, money: &Money, to: &Currency) -> MonetaryResult<Money> {
        let inner = self.inner.read();
        if let Some(pair) = inner.pairs.iter().find(|pair| pair.joins(money.currency(), to)) {
            let converted = convert_money(money, pair)?;
            debug!(from = %money, to = %converted, pair = %pair, "converted money");
            return Ok(converted);
        }

        if inner.strict {
            return Err(MonetaryError::NoSuitableExchangeRate {
                from: money.currency().label(),
                to: to.label(),
            });
        }

        if money.currency() == to {
            return Ok(money.clone());
        }
        if money.currency().accepts(to) {
            warn!(money = %money, to = %to.label(), "no exchange rate, keeping amount");
            return Ok(money.derive(money.amount(), to.clone()));
        }

        warn!(money = %money, to = %to.label(), "no exchange rate, substituting zero");
        Ok(money.derive(Decimal::ZERO, to.clone()))
    }
}
