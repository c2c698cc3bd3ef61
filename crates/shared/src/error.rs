//! Library-wide error types.

use thiserror::Error;

/// Result type alias using `MonetaryError`.
pub type MonetaryResult<T> = Result<T, MonetaryError>;

/// Errors raised by monetary operations.
///
/// Every variant is recoverable by the caller; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonetaryError {
    /// Malformed input (bad currency code, non-finite number, empty ratios).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Arithmetic or comparison across incompatible currencies.
    #[error("The same currency is required (expected: {expected}, but was: {actual})")]
    DifferentCurrencies {
        /// Currency of the receiving value.
        expected: String,
        /// Currency of the offending operand.
        actual: String,
    },

    /// Divisor resolved to zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// No registered currency pair contains both currencies.
    #[error("No suitable currency pair for {base}/{counter}")]
    NoSuitablePair {
        /// Requested base currency code.
        base: String,
        /// Requested counter currency code.
        counter: String,
    },

    /// No exchange rate is available to convert between the currencies.
    #[error("No suitable exchange rate to convert {from} to {to}")]
    NoSuitableExchangeRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// The value does not support the requested operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Decimal arithmetic left the representable range.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl MonetaryError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::DifferentCurrencies { .. } => "DIFFERENT_CURRENCIES",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::NoSuitablePair { .. } => "NO_SUITABLE_PAIR",
            Self::NoSuitableExchangeRate { .. } => "NO_SUITABLE_EXCHANGE_RATE",
            Self::UnsupportedOperation(_) => "UNSUPPORTED_OPERATION",
            Self::Overflow(_) => "OVERFLOW",
        }
    }

    /// Returns true if the error comes from a failed rate lookup.
    ///
    /// These are the only errors a lenient rate table substitutes with a
    /// fallback value instead of returning.
    #[must_use]
    pub const fn is_rate_lookup(&self) -> bool {
        matches!(
            self,
            Self::NoSuitablePair { .. } | Self::NoSuitableExchangeRate { .. }
        )
    }

    /// Shorthand for a `DifferentCurrencies` error.
    #[must_use]
    pub fn different_currencies(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DifferentCurrencies {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
