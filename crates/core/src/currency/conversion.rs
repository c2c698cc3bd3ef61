//! Currency conversion logic.
//!
//! Converting from the base currency multiplies by the ratio, converting from
//! the counter currency divides by it. Results are rounded with the numeric
//! policy of the converted value (half-even to 4 places by default).

use monetary_shared::{MonetaryError, MonetaryResult};

use super::exchange::CurrencyPair;
use crate::money::Money;

/// Converts `money` across `pair` into the pair's other currency.
///
/// # Errors
///
/// `NoSuitableExchangeRate` when `money` is in neither currency of the pair;
/// `Overflow` when the product leaves decimal range.
pub fn convert_money(money: &Money, pair: &CurrencyPair) -> MonetaryResult<Money> {
    let policy = money.policy();
    let (amount, target) = if money.currency() == pair.base() {
        (policy.multiply(money.amount(), pair.ratio())?, pair.counter())
    } else if money.currency() == pair.counter() {
        (policy.divide(money.amount(), pair.ratio())?, pair.base())
    } else {
        return Err(MonetaryError::NoSuitableExchangeRate {
            from: money.currency().label(),
            to: format!("{}/{}", pair.base().code(), pair.counter().code()),
        });
    };

    Ok(money.derive(policy.round(amount), target.clone()))
}
