//! Cart
//!
//! The authoritative list of cart lines for the session. Quantities are always at
//! least one and every aggregate is recomputed from the lines on read.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    pricing::{Amount, OrderTotals, PricingError, PricingPolicy, line_total, total_price},
    products::{Product, ProductId},
    storage::{self, Storage, StorageError, StorageKey},
};

pub mod events;
mod records;

pub use events::{CartEvent, CartObserver, RecordingObserver};
use records::CartLineRecord;

/// A product reference and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product_id: ProductId,
    quantity: u32,
}

impl CartLine {
    /// Product on this line.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Units of the product, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone)]
pub struct PricedLine {
    /// Current catalog record for the product
    pub product: Arc<Product>,

    /// Units in the cart
    pub quantity: u32,

    /// Unit price x quantity
    pub line_total: Amount,
}

/// Cart store.
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLine>,
    open: bool,
    catalog: Arc<Catalog>,
    storage: Arc<dyn Storage>,
    policy: PricingPolicy,
    observers: Vec<Arc<dyn CartObserver>>,
}

impl CartStore {
    /// Create a cart store, restoring any previously persisted lines.
    ///
    /// Persisted lines for products the catalog does not know are dropped.
    pub fn load(catalog: Arc<Catalog>, storage: Arc<dyn Storage>, policy: PricingPolicy) -> Self {
        let records: Vec<CartLineRecord> = storage::load_or_default(&*storage, StorageKey::Cart);
        let mut lines: Vec<CartLine> = Vec::with_capacity(records.len());

        for record in records {
            if record.quantity == 0 || !catalog.contains(record.product_id.as_str()) {
                warn!(product_id = %record.product_id, "dropping stale cart line");
                continue;
            }

            match lines
                .iter_mut()
                .find(|line| line.product_id == record.product_id)
            {
                Some(line) => line.quantity = line.quantity.saturating_add(record.quantity),
                None => lines.push(CartLine {
                    product_id: record.product_id,
                    quantity: record.quantity,
                }),
            }
        }

        debug!(lines = lines.len(), "loaded cart");

        Self {
            lines,
            open: false,
            catalog,
            storage,
            policy,
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Add `quantity` units of a product, merging with any existing line.
    ///
    /// Products the catalog does not know and zero quantities are ignored.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if !self.catalog.contains(product.id.as_str()) {
            warn!(product_id = %product.id, "ignoring product missing from catalog");
            return;
        }

        let event = if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);

            CartEvent::QuantityChanged {
                product_id: product.id.clone(),
                quantity: line.quantity,
            }
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                quantity,
            });

            CartEvent::LineAdded {
                product_id: product.id.clone(),
                quantity,
            }
        };

        self.commit(&event);
    }

    /// Remove the line for a product. Absent products are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        let before = self.lines.len();

        self.lines.retain(|line| &line.product_id != product_id);

        if self.lines.len() != before {
            self.commit(&CartEvent::LineRemoved {
                product_id: product_id.clone(),
            });
        }
    }

    /// Set a line's quantity exactly. Quantities below one remove the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line_mut(product_id) else {
            return;
        };

        if line.quantity == quantity {
            return;
        }

        line.quantity = quantity;

        self.commit(&CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Remove every line and close the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.commit(&CartEvent::Cleared);
        self.set_open(false);
    }

    /// Empty the persisted cart, then the in-memory one.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the empty cart could not be written. The
    /// lines are kept in that case.
    pub fn try_clear(&mut self) -> Result<(), StorageError> {
        storage::save(&*self.storage, StorageKey::Cart, &Vec::<CartLineRecord>::new())?;

        self.lines.clear();
        self.notify(&CartEvent::Cleared);
        self.set_open(false);

        Ok(())
    }

    /// Open or close the cart drawer.
    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            self.open = open;
            self.notify(&CartEvent::OpenChanged { open });
        }
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Total units across all lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price x quantity over all lines, at current catalog prices.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn cart_total(&self) -> Result<Amount, PricingError> {
        let lines = self.priced_lines()?;

        total_price(
            lines.into_iter().map(|line| line.line_total),
            self.catalog.currency(),
        )
    }

    /// Subtotal, tax, shipping and total for the current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any amount cannot be computed.
    pub fn totals(&self) -> Result<OrderTotals, PricingError> {
        OrderTotals::from_subtotal(self.cart_total()?, &self.policy)
    }

    /// Lines resolved against the catalog, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line total overflows.
    pub fn priced_lines(&self) -> Result<Vec<PricedLine>, PricingError> {
        self.lines
            .iter()
            .filter_map(|line| {
                self.catalog
                    .get(line.product_id.as_str())
                    .map(|product| (product, line.quantity))
            })
            .map(|(product, quantity)| {
                let line_total = line_total(&product.price, quantity)?;

                Ok(PricedLine {
                    product,
                    quantity,
                    line_total,
                })
            })
            .collect()
    }

    /// The raw lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of a product in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
            .map_or(0, CartLine::quantity)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pricing rules used for totals.
    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// The catalog lines are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }

    fn commit(&self, event: &CartEvent) {
        self.persist();
        self.notify(event);
    }

    fn persist(&self) {
        let records: Vec<CartLineRecord> = self
            .lines
            .iter()
            .map(|line| CartLineRecord {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
            })
            .collect();

        if let Err(error) = storage::save(&*self.storage, StorageKey::Cart, &records) {
            warn!(%error, "failed to persist cart");
        }
    }

    fn notify(&self, event: &CartEvent) {
        debug!(?event, "cart changed");

        for observer in &self.observers {
            observer.on_cart_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use std::collections::BTreeMap;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use crate::storage::{MemoryStorage, MockStorage};

    use super::*;

    fn usd(minor: i64) -> Amount {
        Money::from_minor(minor, USD)
    }

    fn test_catalog() -> Result<Arc<Catalog>, crate::catalog::CatalogError> {
        Catalog::with_products(
            [
                Product::new("prod-001", "Headphones", usd(60_00), "Audio"),
                Product::new("prod-002", "Stand", usd(20_00), "Accessories"),
                Product::new("prod-003", "Sleeve", usd(29_99), "Accessories"),
            ],
            USD,
        )
        .map(Arc::new)
    }

    fn test_cart() -> Result<(CartStore, Arc<MemoryStorage>), crate::catalog::CatalogError> {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartStore::load(test_catalog()?, storage.clone(), PricingPolicy::standard(USD));

        Ok((cart, storage))
    }

    fn product(cart: &CartStore, id: &str) -> Result<Arc<Product>, String> {
        cart.catalog()
            .get(id)
            .ok_or_else(|| format!("missing product {id}"))
    }

    #[test]
    fn adding_same_product_twice_merges_lines() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let headphones = product(&cart, "prod-001")?;

        cart.add_to_cart(&headphones, 1);
        cart.add_to_cart(&headphones, 1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&headphones.id), 2);

        Ok(())
    }

    #[test]
    fn count_sums_quantities_not_lines() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 2);
        cart.add_to_cart(&*product(&cart, "prod-002")?, 3);

        assert_eq!(cart.cart_count(), 5);
        assert_eq!(cart.lines().len(), 2);

        Ok(())
    }

    #[test]
    fn update_quantity_sets_exact_value() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let stand = product(&cart, "prod-002")?;

        cart.add_to_cart(&stand, 2);
        cart.update_quantity(&stand.id, 5);

        assert_eq!(cart.quantity_of(&stand.id), 5);

        Ok(())
    }

    #[test]
    fn update_quantity_below_one_removes_line() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let headphones = product(&cart, "prod-001")?;
        let stand = product(&cart, "prod-002")?;

        cart.add_to_cart(&headphones, 1);
        cart.add_to_cart(&stand, 1);

        cart.update_quantity(&headphones.id, 0);
        cart.update_quantity(&stand.id, -1);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_for_absent_product_is_noop() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.update_quantity(&ProductId::new("prod-003"), 4);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn remove_absent_product_is_noop() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let recorder = Arc::new(RecordingObserver::new());
        cart.subscribe(recorder.clone());

        cart.remove_from_cart(&ProductId::new("prod-001"));

        assert!(cart.is_empty());
        assert!(recorder.take().is_empty());

        Ok(())
    }

    #[test]
    fn zero_quantity_and_unknown_products_are_ignored() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let unknown = Product::new("prod-404", "Ghost", usd(1_00), "Audio");

        cart.add_to_cart(&*product(&cart, "prod-001")?, 0);
        cart.add_to_cart(&unknown, 1);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn total_is_sum_of_line_totals() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 2);
        cart.add_to_cart(&*product(&cart, "prod-003")?, 3);
        cart.update_quantity(&ProductId::new("prod-003"), 1);
        cart.add_to_cart(&*product(&cart, "prod-002")?, 1);
        cart.remove_from_cart(&ProductId::new("prod-002"));

        assert_eq!(cart.cart_total()?, usd(2 * 60_00 + 29_99));

        Ok(())
    }

    #[test]
    fn total_matches_line_sum_over_random_edits() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let ghost = Product::new("prod-404", "Ghost", usd(5_00), "Audio");
        let prices = BTreeMap::from([("prod-001", 60_00), ("prod-002", 20_00), ("prod-003", 29_99)]);
        let ids = ["prod-001", "prod-002", "prod-003", "prod-404"];

        let mut expected: BTreeMap<&str, i64> = BTreeMap::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2_000 {
            let id = *ids.get(rng.gen_range(0..ids.len())).ok_or("no product id")?;

            match rng.gen_range(0..3) {
                0 => {
                    let quantity = rng.gen_range(0..4_u32);

                    match cart.catalog().get(id) {
                        Some(product) => cart.add_to_cart(&product, quantity),
                        None => cart.add_to_cart(&ghost, quantity),
                    }

                    if quantity > 0 && prices.contains_key(&id) {
                        *expected.entry(id).or_insert(0) += i64::from(quantity);
                    }
                }
                1 => {
                    cart.remove_from_cart(&ProductId::new(id));
                    expected.remove(&id);
                }
                _ => {
                    let quantity = rng.gen_range(-2..6_i64);

                    cart.update_quantity(&ProductId::new(id), quantity);

                    if quantity < 1 {
                        expected.remove(&id);
                    } else if let Some(current) = expected.get_mut(&id) {
                        *current = quantity;
                    }
                }
            }

            let subtotal: i64 = expected
                .iter()
                .map(|(id, quantity)| prices.get(id).copied().unwrap_or(0) * quantity)
                .sum();
            let count: i64 = expected.values().sum();

            assert_eq!(cart.cart_total()?, usd(subtotal));
            assert_eq!(i64::try_from(cart.cart_count())?, count);
        }

        Ok(())
    }

    #[test]
    fn try_clear_empties_stored_cart() -> TestResult {
        let (mut cart, storage) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 2);
        cart.set_open(true);
        cart.try_clear()?;

        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert_eq!(storage.get(StorageKey::Cart)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn try_clear_keeps_lines_when_write_fails() -> TestResult {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, value| {
                if value == "[]" {
                    Err(StorageError::Unavailable("quota exceeded".to_string()))
                } else {
                    Ok(())
                }
            });

        let mut cart = CartStore::load(
            test_catalog()?,
            Arc::new(storage),
            PricingPolicy::standard(USD),
        );

        cart.add_to_cart(&*product(&cart, "prod-002")?, 3);

        assert!(matches!(cart.try_clear(), Err(StorageError::Unavailable(_))));
        assert_eq!(cart.cart_count(), 3);

        Ok(())
    }

    #[test]
    fn totals_follow_pricing_policy() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 2);

        let totals = cart.totals()?;

        assert_eq!(totals.subtotal, usd(120_00));
        assert_eq!(totals.tax, usd(9_60));
        assert_eq!(totals.shipping, usd(0));
        assert_eq!(totals.total, usd(129_60));

        Ok(())
    }

    #[test]
    fn empty_cart_totals_charge_shipping_on_zero() -> TestResult {
        let (cart, _) = test_cart()?;

        assert_eq!(cart.cart_total()?, usd(0));
        assert_eq!(cart.totals()?.shipping, usd(9_99));

        Ok(())
    }

    #[test]
    fn total_tracks_catalog_price_changes() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-002")?, 1);
        cart.catalog().reprice("prod-002", usd(25_00))?;

        assert_eq!(cart.cart_total()?, usd(25_00));

        Ok(())
    }

    #[test]
    fn clear_cart_removes_lines_and_closes() -> TestResult {
        let (mut cart, _) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 1);
        cart.set_open(true);
        cart.clear_cart();

        assert!(cart.is_empty());
        assert!(!cart.is_open());

        Ok(())
    }

    #[test]
    fn mutations_notify_observers() -> TestResult {
        let (mut cart, _) = test_cart()?;
        let recorder = Arc::new(RecordingObserver::new());
        cart.subscribe(recorder.clone());

        let headphones = product(&cart, "prod-001")?;

        cart.add_to_cart(&headphones, 1);
        cart.add_to_cart(&headphones, 2);
        cart.set_open(true);
        cart.update_quantity(&headphones.id, 0);
        cart.clear_cart();

        assert_eq!(
            recorder.take(),
            vec![
                CartEvent::LineAdded {
                    product_id: headphones.id.clone(),
                    quantity: 1
                },
                CartEvent::QuantityChanged {
                    product_id: headphones.id.clone(),
                    quantity: 3
                },
                CartEvent::OpenChanged { open: true },
                CartEvent::LineRemoved {
                    product_id: headphones.id.clone()
                },
                CartEvent::Cleared,
                CartEvent::OpenChanged { open: false },
            ]
        );

        Ok(())
    }

    #[test]
    fn mutations_persist_and_reload() -> TestResult {
        let (mut cart, storage) = test_cart()?;

        cart.add_to_cart(&*product(&cart, "prod-001")?, 2);
        cart.add_to_cart(&*product(&cart, "prod-003")?, 1);

        let reloaded = CartStore::load(
            cart.catalog().clone(),
            storage,
            PricingPolicy::standard(USD),
        );

        assert_eq!(reloaded.lines(), cart.lines());

        Ok(())
    }

    #[test]
    fn load_drops_unknown_products_and_merges_duplicates() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(
            StorageKey::Cart,
            r#"[
                {"product_id":"prod-001","quantity":1},
                {"product_id":"prod-404","quantity":2},
                {"product_id":"prod-001","quantity":2},
                {"product_id":"prod-002","quantity":0}
            ]"#
            .to_string(),
        )?;

        let cart = CartStore::load(test_catalog()?, storage, PricingPolicy::standard(USD));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("prod-001")), 3);

        Ok(())
    }

    #[test]
    fn load_treats_corrupt_cart_as_empty() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(StorageKey::Cart, r#"[{"product_id":"prod-001","quantity":-4}]"#.to_string())?;

        let cart = CartStore::load(test_catalog()?, storage, PricingPolicy::standard(USD));

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn write_failures_keep_in_memory_state() -> TestResult {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::Unavailable("quota exceeded".to_string())));

        let mut cart = CartStore::load(
            test_catalog()?,
            Arc::new(storage),
            PricingPolicy::standard(USD),
        );

        cart.add_to_cart(&*product(&cart, "prod-002")?, 1);

        assert_eq!(cart.cart_count(), 1);

        Ok(())
    }
}
