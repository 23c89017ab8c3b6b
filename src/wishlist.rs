//! Wishlist
//!
//! Saved products, kept apart from the cart and persisted as a list of ids.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::CartStore,
    catalog::Catalog,
    products::{Product, ProductId},
    storage::{self, Storage, StorageKey},
};

/// Wishlist errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WishlistError {
    /// The catalog has no product with this id.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The product is not on the wishlist.
    #[error("product {0} is not on the wishlist")]
    NotSaved(ProductId),
}

/// Products saved for later.
#[derive(Debug)]
pub struct Wishlist {
    ids: Vec<ProductId>,
    catalog: Arc<Catalog>,
    storage: Arc<dyn Storage>,
}

impl Wishlist {
    /// Load the persisted wishlist.
    pub fn load(catalog: Arc<Catalog>, storage: Arc<dyn Storage>) -> Self {
        let mut ids: Vec<ProductId> = storage::load_or_default(&*storage, StorageKey::Wishlist);
        let mut seen = Vec::with_capacity(ids.len());

        ids.retain(|id| {
            let keep = !seen.contains(id);
            seen.push(id.clone());
            keep
        });

        debug!(items = ids.len(), "loaded wishlist");

        Self {
            ids,
            catalog,
            storage,
        }
    }

    /// Save a product. Returns `false` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::UnknownProduct`] if the catalog has no such product.
    pub fn add(&mut self, id: &str) -> Result<bool, WishlistError> {
        if !self.catalog.contains(id) {
            return Err(WishlistError::UnknownProduct(ProductId::new(id)));
        }

        if self.contains(id) {
            return Ok(false);
        }

        self.ids.push(ProductId::new(id));
        self.persist();

        Ok(true)
    }

    /// Remove a saved product. Returns `false` if it was not saved.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();

        self.ids.retain(|saved| saved.as_str() != id);

        let removed = self.ids.len() != before;

        if removed {
            self.persist();
        }

        removed
    }

    /// Whether a product is saved.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved.as_str() == id)
    }

    /// Save the product if it is not saved, otherwise remove it. Returns whether
    /// it is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::UnknownProduct`] when saving an unknown product.
    pub fn toggle(&mut self, id: &str) -> Result<bool, WishlistError> {
        if self.remove(id) {
            Ok(false)
        } else {
            self.add(id)
        }
    }

    /// Saved products still in the catalog, in the order they were saved.
    pub fn items(&self) -> Vec<Arc<Product>> {
        self.ids
            .iter()
            .filter_map(|id| self.catalog.get(id.as_str()))
            .collect()
    }

    /// Saved product ids.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add one unit of a saved product to the cart and unsave it.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::NotSaved`] if the product is not on the
    /// wishlist, or [`WishlistError::UnknownProduct`] if it left the catalog.
    pub fn move_to_cart(&mut self, id: &str, cart: &mut CartStore) -> Result<(), WishlistError> {
        if !self.contains(id) {
            return Err(WishlistError::NotSaved(ProductId::new(id)));
        }

        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| WishlistError::UnknownProduct(ProductId::new(id)))?;

        cart.add_to_cart(&product, 1);
        self.remove(id);

        Ok(())
    }

    fn persist(&self) {
        if let Err(error) = storage::save(&*self.storage, StorageKey::Wishlist, &self.ids) {
            warn!(%error, "failed to persist wishlist");
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{pricing::PricingPolicy, storage::MemoryStorage};

    use super::*;

    fn catalog() -> Result<Arc<Catalog>, crate::catalog::CatalogError> {
        Catalog::with_products(
            [
                Product::new("prod-001", "Headphones", Money::from_minor(199_99, USD), "Audio"),
                Product::new("prod-002", "Watch", Money::from_minor(299_99, USD), "Wearables"),
            ],
            USD,
        )
        .map(Arc::new)
    }

    #[test]
    fn add_is_idempotent_and_persisted() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        let mut wishlist = Wishlist::load(catalog()?, storage.clone());

        assert!(wishlist.add("prod-001")?);
        assert!(!wishlist.add("prod-001")?);

        let reloaded = Wishlist::load(catalog()?, storage);

        assert_eq!(reloaded.ids(), &[ProductId::new("prod-001")]);

        Ok(())
    }

    #[test]
    fn unknown_products_cannot_be_saved() -> TestResult {
        let mut wishlist = Wishlist::load(catalog()?, Arc::new(MemoryStorage::new()));

        assert_eq!(
            wishlist.add("prod-404"),
            Err(WishlistError::UnknownProduct(ProductId::new("prod-404")))
        );

        Ok(())
    }

    #[test]
    fn toggle_flips_membership() -> TestResult {
        let mut wishlist = Wishlist::load(catalog()?, Arc::new(MemoryStorage::new()));

        assert!(wishlist.toggle("prod-002")?);
        assert!(wishlist.contains("prod-002"));
        assert!(!wishlist.toggle("prod-002")?);
        assert!(wishlist.is_empty());
        assert!(!wishlist.remove("prod-002"));

        Ok(())
    }

    #[test]
    fn move_to_cart_adds_one_and_unsaves() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        let catalog = catalog()?;
        let mut cart = CartStore::load(catalog.clone(), storage.clone(), PricingPolicy::standard(USD));
        let mut wishlist = Wishlist::load(catalog, storage);

        wishlist.add("prod-001")?;
        wishlist.move_to_cart("prod-001", &mut cart)?;

        assert!(wishlist.is_empty());
        assert_eq!(cart.quantity_of(&ProductId::new("prod-001")), 1);

        assert_eq!(
            wishlist.move_to_cart("prod-002", &mut cart),
            Err(WishlistError::NotSaved(ProductId::new("prod-002")))
        );

        Ok(())
    }

    #[test]
    fn items_resolve_against_catalog() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(
            StorageKey::Wishlist,
            r#"["prod-002","prod-404","prod-002"]"#.to_string(),
        )?;

        let wishlist = Wishlist::load(catalog()?, storage);
        let names: Vec<String> = wishlist.items().iter().map(|p| p.name.clone()).collect();

        assert_eq!(wishlist.len(), 2);
        assert_eq!(names, vec!["Watch"]);

        Ok(())
    }
}
