//! Shared errors, configuration, and tracing setup for Monetary.
//!
//! This crate provides the ambient pieces used by `monetary-core`:
//! - The monetary error taxonomy
//! - Configuration management (rounding and rate-table policy)
//! - Tracing subscriber bootstrap

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{MonetaryConfig, RateConfig, RoundingConfig, RoundingMode};
pub use error::{MonetaryError, MonetaryResult};
