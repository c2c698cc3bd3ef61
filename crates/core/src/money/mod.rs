//! Monetary values, arithmetic policies and allocation.

mod allocation;
mod factory;
mod monetary;
mod operand;
mod policy;
mod slender;
mod value;

#[cfg(test)]
mod props;

pub use allocation::{AllocationUtil, MAX_DECIMAL_PLACES};
pub use factory::{MoneyFactory, PolicyMoneyFactory};
pub use monetary::{Addend, Monetary};
pub use operand::Operand;
pub use policy::{DecimalPolicy, NumericPolicy, default_policy, round_with};
pub use slender::SlenderMoney;
pub use value::Money;
