//! Currencies, currency pairs and exchange rate tables.

mod conversion;
mod exchange;
mod rate_table;
mod types;

#[cfg(test)]
mod props;

pub use conversion::convert_money;
pub use exchange::CurrencyPair;
pub use rate_table::{PairCriteria, RateTable};
pub use types::{CODE_LENGTH, Currency};
