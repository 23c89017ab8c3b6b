//! Storefront Context

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;
use tracing::debug;

use crate::{
    auth::{AuthDelays, AuthService, LocalAuthService},
    cart::CartStore,
    catalog::Catalog,
    checkout::{Checkout, CheckoutError},
    config::StorefrontConfig,
    fixtures::{self, FixtureError},
    orders::{OrderHistory, OrderId},
    pricing::{PricingError, PricingPolicy},
    storage::{FileStorage, Storage, StorageError},
    wishlist::Wishlist,
};

/// Errors building a storefront from configuration.
#[derive(Debug, Error)]
pub enum StorefrontInitError {
    /// The storage directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The catalog could not be loaded.
    #[error("failed to load catalog")]
    Catalog(#[from] FixtureError),

    /// Pricing settings are invalid.
    #[error("invalid pricing settings")]
    Pricing(#[from] PricingError),

    /// Catalog and pricing settings use different currencies.
    #[error("catalog is priced in {catalog} but pricing settings use {pricing}")]
    CurrencyMismatch {
        /// Catalog currency code
        catalog: &'static str,
        /// Pricing currency code
        pricing: &'static str,
    },
}

/// Tunables that are not part of the stores themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorefrontSettings {
    /// Tax and shipping rules
    pub policy: PricingPolicy,

    /// Auth call latency
    pub auth_delays: AuthDelays,

    /// Delay before an order is submitted
    pub submit_delay: Duration,
}

impl StorefrontSettings {
    /// Standard pricing in the catalog currency, no simulated latency.
    #[must_use]
    pub fn immediate(catalog: &Catalog) -> Self {
        Self {
            policy: PricingPolicy::standard(catalog.currency()),
            auth_delays: AuthDelays::none(),
            submit_delay: Duration::ZERO,
        }
    }
}

/// Every storefront service, sharing one catalog and one storage backend.
pub struct Storefront {
    /// Products for sale
    pub catalog: Arc<Catalog>,

    /// The shopper's cart
    pub cart: CartStore,

    /// Placed orders
    pub orders: OrderHistory,

    /// Saved products
    pub wishlist: Wishlist,

    /// Sign-in and profile
    pub auth: Arc<dyn AuthService>,

    submit_delay: Duration,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("orders", &self.orders)
            .field("wishlist", &self.wishlist)
            .field("signed_in", &self.auth.current_user().is_some())
            .field("submit_delay", &self.submit_delay)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Wire up the services over the given catalog and storage.
    pub fn new(catalog: Catalog, storage: Arc<dyn Storage>, settings: StorefrontSettings) -> Self {
        let catalog = Arc::new(catalog);

        Self {
            cart: CartStore::load(catalog.clone(), storage.clone(), settings.policy),
            orders: OrderHistory::load(storage.clone()),
            wishlist: Wishlist::load(catalog.clone(), storage.clone()),
            auth: Arc::new(LocalAuthService::load(storage, settings.auth_delays)),
            catalog,
            submit_delay: settings.submit_delay,
        }
    }

    /// Build a storefront from CLI and environment settings.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontInitError`] if the storage directory, catalog or
    /// pricing settings are unusable.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontInitError> {
        let storage = FileStorage::open(&config.storage.data_dir)?;

        let catalog = match &config.storage.catalog {
            Some(path) => fixtures::load_catalog(path)?,
            None => fixtures::default_catalog()?,
        };

        let policy = config.pricing.policy()?;

        if policy.currency() != catalog.currency() {
            return Err(StorefrontInitError::CurrencyMismatch {
                catalog: catalog.currency().iso_alpha_code,
                pricing: policy.currency().iso_alpha_code,
            });
        }

        debug!(
            data_dir = %storage.root().display(),
            products = catalog.len(),
            "storefront ready"
        );

        Ok(Self::new(
            catalog,
            Arc::new(storage),
            StorefrontSettings {
                policy,
                auth_delays: config.latency.auth_delays(),
                submit_delay: config.latency.submit_delay(),
            },
        ))
    }

    /// Start a new checkout.
    #[must_use]
    pub fn checkout(&self) -> Checkout {
        Checkout::new()
    }

    /// Place the order for a checkout at the review stage, after the simulated
    /// submission delay.
    ///
    /// # Errors
    ///
    /// See [`Checkout::place_order_at`].
    pub async fn place_order(&mut self, checkout: &mut Checkout) -> Result<OrderId, CheckoutError> {
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }

        checkout.place_order(&mut self.cart, &mut self.orders)
    }
}
