//! Multi-currency money bags.

mod money_bag;

pub use money_bag::MoneyBag;
