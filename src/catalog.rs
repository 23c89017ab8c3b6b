//! Catalog
//!
//! The product list for a session. Entries are handed out as `Arc<Product>`, so
//! re-pricing a product swaps the entry without touching copies already held by
//! carts, wishlists or order snapshots.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard},
};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::Amount,
    products::{Product, ProductId, ProductKey},
};

/// Errors related to catalog construction and updates.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product's currency differs from the catalog currency (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Two products share an id.
    #[error("Duplicate product id {0}")]
    DuplicateId(ProductId),

    /// A product has a negative price.
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product rating is outside 0.0 to 5.0.
    #[error("Product {0} has rating {1}, expected 0.0 to 5.0")]
    RatingOutOfRange(ProductId, f64),

    /// No product with the given id exists.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
}

/// Ordering applied to product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,

    /// Cheapest first.
    PriceLowHigh,

    /// Most expensive first.
    PriceHighLow,

    /// Highest rated first.
    Rating,

    /// Alphabetical by name.
    NameAZ,

    /// Reverse alphabetical by name.
    NameZA,
}

impl SortOrder {
    /// Parse a sort name; anything unrecognised falls back to [`SortOrder::Featured`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "price-low-high" => Self::PriceLowHigh,
            "price-high-low" => Self::PriceHighLow,
            "rating" => Self::Rating,
            "name-a-z" => Self::NameAZ,
            "name-z-a" => Self::NameZA,
            _ => Self::Featured,
        }
    }

    /// The name this order parses from.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::Rating => "rating",
            Self::NameAZ => "name-a-z",
            Self::NameZA => "name-z-a",
        }
    }

    /// Return the products in this order. Ties keep their incoming order.
    #[must_use]
    pub fn sorted(self, mut products: Vec<Arc<Product>>) -> Vec<Arc<Product>> {
        match self {
            Self::Featured => {}
            Self::PriceLowHigh => products.sort_by_key(|p| p.price.to_minor_units()),
            Self::PriceHighLow => {
                products.sort_by_key(|p| std::cmp::Reverse(p.price.to_minor_units()));
            }
            Self::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Self::NameAZ => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
            Self::NameZA => products.sort_by(|a, b| compare_names(&b.name, &a.name)),
        }

        products
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Default)]
struct Entries {
    products: SlotMap<ProductKey, Arc<Product>>,
    keys: FxHashMap<ProductId, ProductKey>,
    order: Vec<ProductKey>,
}

impl Entries {
    fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    entries: RwLock<Entries>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            entries: RwLock::new(Entries::default()),
            currency,
        }
    }

    /// Create a catalog with the given products, in listing order.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if any product fails validation.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Add a product to the end of the listing.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the id is taken, or the price or rating is invalid.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        self.validate(&product)?;

        let entries = self
            .entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);

        if entries.keys.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }

        let id = product.id.clone();
        let key = entries.products.insert(Arc::new(product));

        entries.keys.insert(id, key);
        entries.order.push(key);

        Ok(key)
    }

    /// Replace a product's price. Existing `Arc<Product>` handles keep the old record.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the product is unknown or the price is invalid.
    pub fn reprice(&self, id: &str, price: Amount) -> Result<Arc<Product>, CatalogError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let key = *entries
            .keys
            .get(id)
            .ok_or_else(|| CatalogError::ProductNotFound(ProductId::new(id)))?;

        let slot = entries
            .products
            .get_mut(key)
            .ok_or_else(|| CatalogError::ProductNotFound(ProductId::new(id)))?;

        let mut product = (**slot).clone();
        product.price = price;
        self.validate(&product)?;

        debug!(product_id = id, price = %price, "repriced product");

        let product = Arc::new(product);
        *slot = Arc::clone(&product);

        Ok(product)
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<Arc<Product>> {
        let entries = self.read();

        entries
            .keys
            .get(id)
            .and_then(|key| entries.products.get(*key))
            .cloned()
    }

    /// Whether a product with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.read().keys.contains_key(id)
    }

    /// All products in listing order.
    pub fn products(&self) -> Vec<Arc<Product>> {
        self.read().iter().cloned().collect()
    }

    /// Products in exactly the given category.
    pub fn by_category(&self, category: &str) -> Vec<Arc<Product>> {
        self.filtered(|product| product.category == category)
    }

    /// Distinct categories, in the order they first appear.
    pub fn categories(&self) -> Vec<String> {
        let entries = self.read();
        let mut categories: Vec<String> = Vec::new();

        for product in entries.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        categories
    }

    /// Case-insensitive name search. An empty term returns everything.
    pub fn search(&self, term: &str) -> Vec<Arc<Product>> {
        let needle = term.trim().to_lowercase();

        if needle.is_empty() {
            return self.products();
        }

        self.filtered(|product| product.name.to_lowercase().contains(&needle))
    }

    /// Products priced within `min..=max`.
    pub fn filter_by_price(&self, min: &Amount, max: &Amount) -> Vec<Arc<Product>> {
        let (min, max) = (min.to_minor_units(), max.to_minor_units());

        self.filtered(|product| (min..=max).contains(&product.price.to_minor_units()))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Arc<Product>> {
        self.read()
            .iter()
            .filter(|product| predicate(product))
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate(&self, product: &Product) -> Result<(), CatalogError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if product.price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(product.id.clone()));
        }

        if !(0.0..=5.0).contains(&product.rating) {
            return Err(CatalogError::RatingOutOfRange(
                product.id.clone(),
                product.rating,
            ));
        }

        Ok(())
    }
}
