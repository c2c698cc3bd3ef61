//! Policy-free snapshots of `Money` for storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::factory::MoneyFactory;
use super::monetary::Monetary;
use super::value::Money;
use crate::currency::Currency;

/// Amount plus currency code, nothing else.
///
/// Serializes as `{"amount": "12.50", "currency": "USD"}`; the null currency
/// is stored as an empty code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlenderMoney {
    amount: Decimal,
    #[serde(serialize_with = "serialize_code", deserialize_with = "deserialize_code")]
    currency: Currency,
}

impl SlenderMoney {
    /// Takes a snapshot of `money`.
    #[must_use]
    pub fn slenderize(money: &Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency().clone(),
        }
    }

    /// Rebuilds a full value through `factory`.
    #[must_use]
    pub fn restore(&self, factory: &dyn MoneyFactory) -> Money {
        factory.create(self.amount, self.currency.clone())
    }

    /// The stored amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The stored currency code.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        self.currency.code()
    }
}

impl From<&Money> for SlenderMoney {
    fn from(money: &Money) -> Self {
        Self::slenderize(money)
    }
}

// Snapshots have no arithmetic, so bags refuse them.
impl Monetary for SlenderMoney {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn currency(&self) -> &Currency {
        &self.currency
    }
}

fn serialize_code<S: Serializer>(currency: &Currency, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(currency.code())
}

fn deserialize_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Currency, D::Error> {
    let code = String::deserialize(deserializer)?;
    if code.trim().is_empty() {
        return Ok(Currency::null());
    }
    Currency::from_code(&code).map_err(serde::de::Error::custom)
}
