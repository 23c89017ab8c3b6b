//! Latency Config

use std::time::Duration;

use clap::Args;

use crate::auth::AuthDelays;

/// Simulated round-trip delays.
#[derive(Debug, Clone, Args)]
pub struct LatencyConfig {
    /// Login and signup delay in milliseconds
    #[arg(long, env = "STOREFRONT_AUTH_LATENCY_MS", default_value_t = 1000)]
    pub auth_latency_ms: u64,

    /// Profile update delay in milliseconds
    #[arg(long, env = "STOREFRONT_PROFILE_LATENCY_MS", default_value_t = 500)]
    pub profile_latency_ms: u64,

    /// Order submission delay in milliseconds
    #[arg(long, env = "STOREFRONT_SUBMIT_LATENCY_MS", default_value_t = 0)]
    pub submit_latency_ms: u64,
}

impl LatencyConfig {
    /// Delays for the auth service.
    #[must_use]
    pub fn auth_delays(&self) -> AuthDelays {
        AuthDelays {
            login: Duration::from_millis(self.auth_latency_ms),
            signup: Duration::from_millis(self.auth_latency_ms),
            update_profile: Duration::from_millis(self.profile_latency_ms),
        }
    }

    /// Delay before an order is submitted.
    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}
