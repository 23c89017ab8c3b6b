//! Storefront configuration

use clap::Args;

use crate::config::{
    latency::LatencyConfig, observability::LoggingConfig, pricing::PricingConfig,
    storage::StorageConfig,
};

pub mod latency;
pub mod observability;
pub mod pricing;
pub mod storage;

pub use observability::LogFormat;

/// Storefront settings, read from CLI flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Storage and catalog locations.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Currency, tax and shipping rules.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Simulated service latency.
    #[command(flatten)]
    pub latency: LatencyConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load `.env` into the process environment if present.
pub fn load_dotenv() {
    // Missing .env files are fine
    _ = dotenvy::dotenv();
}
