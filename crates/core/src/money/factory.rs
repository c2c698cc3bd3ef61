//! Construction of `Money` values bound to a numeric policy.

use std::fmt;
use std::sync::Arc;

use monetary_shared::MonetaryConfig;
use rust_decimal::Decimal;

use super::policy::{DecimalPolicy, NumericPolicy, default_policy};
use super::value::Money;
use crate::currency::Currency;

/// Creates `Money` values. Bags use a factory for the values they build
/// themselves (zero totals, restored snapshots).
pub trait MoneyFactory: fmt::Debug + Send + Sync {
    /// Creates `amount` in `currency`.
    fn create(&self, amount: Decimal, currency: Currency) -> Money;

    /// Creates zero in `currency`.
    fn zero(&self, currency: Currency) -> Money {
        self.create(Decimal::ZERO, currency)
    }
}

/// Factory attaching one shared policy to every value it creates.
#[derive(Debug, Clone)]
pub struct PolicyMoneyFactory {
    policy: Arc<dyn NumericPolicy>,
}

impl PolicyMoneyFactory {
    /// Creates a factory for `policy`.
    #[must_use]
    pub fn new(policy: Arc<dyn NumericPolicy>) -> Self {
        Self { policy }
    }

    /// Creates a factory whose policy follows the configured rounding.
    #[must_use]
    pub fn from_config(config: &MonetaryConfig) -> Self {
        Self::new(Arc::new(DecimalPolicy::from_config(config)))
    }

    /// The policy handed to created values.
    #[must_use]
    pub fn policy(&self) -> &Arc<dyn NumericPolicy> {
        &self.policy
    }
}

impl Default for PolicyMoneyFactory {
    fn default() -> Self {
        Self::new(default_policy())
    }
}

impl MoneyFactory for PolicyMoneyFactory {
    fn create(&self, amount: Decimal, currency: Currency) -> Money {
        Money::with_policy(amount, currency, Arc::clone(&self.policy))
    }
}
