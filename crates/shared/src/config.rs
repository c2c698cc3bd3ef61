//! Library configuration management.

use serde::{Deserialize, Serialize};

/// Monetary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonetaryConfig {
    /// Rounding applied by the default numeric policy.
    pub rounding: RoundingConfig,
    /// Rate table behavior.
    pub rates: RateConfig,
}

/// How midpoints are resolved when a value is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 2.5 -> 3, -2.5 -> -3
    HalfUp,
    /// 2.5 -> 2, -2.5 -> -2
    HalfDown,
    /// Banker's rounding: 2.5 -> 2, 3.5 -> 4
    #[default]
    HalfEven,
    /// 2.5 -> 3, 3.5 -> 3
    HalfOdd,
}

/// Rounding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingConfig {
    /// Midpoint strategy.
    pub mode: RoundingMode,
    /// Number of decimal places kept when rounding.
    pub precision: u32,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            mode: RoundingMode::default(),
            precision: default_precision(),
        }
    }
}

const fn default_precision() -> u32 {
    4
}

/// Rate table configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Fail with `NoSuitableExchangeRate` instead of substituting a fallback
    /// value when no pair is registered.
    pub strict: bool,
}

impl MonetaryConfig {
    /// Loads configuration from `.env`, an optional config file, and the
    /// environment (`MONETARY__ROUNDING__PRECISION=2` style keys).
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/monetary").required(false))
            .add_source(
                config::Environment::with_prefix("MONETARY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(
            rounding_mode = ?loaded.rounding.mode,
            precision = loaded.rounding.precision,
            strict_rates = loaded.rates.strict,
            "Monetary configuration loaded"
        );
        Ok(loaded)
    }
}
