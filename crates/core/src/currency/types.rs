//! Currency identity type.

use std::fmt;
use std::str::FromStr;

use monetary_shared::{MonetaryError, MonetaryResult};
use serde::{Deserialize, Serialize};

/// Required length of a currency code.
pub const CODE_LENGTH: usize = 3;

/// A currency identified by its code (e.g., "USD").
///
/// Equality and hashing use the code only; the display name is informational.
/// The null currency (empty code) stands in for "no currency" on zero amounts
/// and is compatible with every currency, see [`Currency::accepts`].
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCurrency")]
pub struct Currency {
    code: String,
    name: String,
}

/// Serialized form of [`Currency`], validated on the way in.
#[derive(Deserialize)]
struct RawCurrency {
    code: String,
    #[serde(default)]
    name: String,
}

impl TryFrom<RawCurrency> for Currency {
    type Error = MonetaryError;

    fn try_from(raw: RawCurrency) -> MonetaryResult<Self> {
        if raw.code.trim().is_empty() {
            return Ok(Self::null());
        }
        Self::new(&raw.code, &raw.name)
    }
}

impl Currency {
    /// Creates a currency from a code and a display name.
    ///
    /// The code is trimmed and uppercased and must be exactly three
    /// characters long.
    pub fn new(code: &str, name: &str) -> MonetaryResult<Self> {
        let code = code.trim();
        let length = code.chars().count();
        if length != CODE_LENGTH {
            return Err(MonetaryError::InvalidArgument(format!(
                "currency code must be {CODE_LENGTH} characters long; given: {length}"
            )));
        }

        Ok(Self {
            code: code.to_uppercase(),
            name: name.trim().to_string(),
        })
    }

    /// Creates a currency without a display name.
    pub fn from_code(code: &str) -> MonetaryResult<Self> {
        Self::new(code, "")
    }

    /// The "no currency" sentinel.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
        }
    }

    /// Returns true for the null currency.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.code.is_empty()
    }

    /// The uppercase currency code; empty for the null currency.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The display name, possibly empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if amounts in `other` may be combined with amounts in
    /// this currency: the codes match or either side is the null currency.
    #[must_use]
    pub fn accepts(&self, other: &Self) -> bool {
        self.is_null() || other.is_null() || self.code == other.code
    }

    /// Code used in error messages; the null currency renders as "NULL".
    pub(crate) fn label(&self) -> String {
        if self.is_null() {
            "NULL".to_string()
        } else {
            self.code.clone()
        }
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl std::hash::Hash for Currency {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.label())
        } else {
            write!(f, "{} '{}'", self.label(), self.name)
        }
    }
}

impl FromStr for Currency {
    type Err = MonetaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
