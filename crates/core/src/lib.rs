//! Core monetary logic for Monetary.
//!
//! This crate contains pure value logic with ZERO I/O dependencies.
//! All amounts are `rust_decimal::Decimal`; floating point never touches money.
//!
//! # Modules
//!
//! - `currency` - Currencies, currency pairs and exchange rate tables
//! - `money` - Money values, numeric policies and allocation
//! - `bag` - Multi-currency money bags
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use monetary_core::{Currency, CurrencyPair, Money, MoneyBag, RateTable};
//!
//! let rates = Arc::new(RateTable::new());
//! rates.attach(CurrencyPair::of("USD", "EUR", dec!(2)).unwrap());
//!
//! let mut bag = MoneyBag::with_rates(dec!(10), Currency::from_code("USD").unwrap(), rates);
//! bag.add_money(&Money::of("EUR", dec!(4)).unwrap()).unwrap();
//! assert_eq!(bag.total_in(&Currency::from_code("EUR").unwrap()).unwrap(), dec!(24));
//! ```

pub mod bag;
pub mod currency;
pub mod money;

pub use bag::MoneyBag;
pub use currency::{Currency, CurrencyPair, PairCriteria, RateTable};
pub use money::{Monetary, Money, MoneyFactory, NumericPolicy, SlenderMoney};
pub use monetary_shared::{MonetaryError, MonetaryResult};
