//! Pricing Config

use clap::Args;

use crate::pricing::{PricingError, PricingPolicy, parse_amount, parse_currency, parse_percentage};

/// Currency, tax and shipping rules.
#[derive(Debug, Clone, Args)]
pub struct PricingConfig {
    /// Store currency (GBP, USD, EUR)
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Tax rate, as "8%" or "0.08"
    #[arg(long, env = "STOREFRONT_TAX_RATE", default_value = "8%")]
    pub tax_rate: String,

    /// Subtotals above this amount ship free
    #[arg(long = "free-shipping-over", env = "STOREFRONT_FREE_SHIPPING_OVER", default_value = "100.00")]
    pub free_shipping_threshold: String,

    /// Shipping fee below the free shipping threshold
    #[arg(long = "shipping-fee", env = "STOREFRONT_SHIPPING_FEE", default_value = "9.99")]
    pub flat_shipping_fee: String,
}

impl PricingConfig {
    /// Build the pricing policy these settings describe.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any setting cannot be parsed.
    pub fn policy(&self) -> Result<PricingPolicy, PricingError> {
        let currency = parse_currency(&self.currency)?;

        Ok(PricingPolicy {
            tax_rate: parse_percentage(&self.tax_rate)?,
            free_shipping_threshold: parse_amount(&self.free_shipping_threshold, currency)?,
            flat_shipping_fee: parse_amount(&self.flat_shipping_fee, currency)?,
        })
    }
}
