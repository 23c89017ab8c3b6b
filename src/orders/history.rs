//! Order history
//!
//! Append-only list of placed orders. The persisted list is written before the
//! in-memory list changes, so a failed append leaves both untouched. Stored
//! records that cannot be read are kept as they are and written back.

use std::sync::Arc;

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::storage::{self, Storage, StorageError, StorageKey};

use super::{Order, OrderError, OrderId, records::OrderRecord};

const MAX_ID_ATTEMPTS: usize = 8;

/// Every order placed from this storage, oldest first.
#[derive(Debug)]
pub struct OrderHistory {
    orders: Vec<Order>,
    unreadable: Vec<Value>,
    latest: Option<OrderId>,
    storage: Arc<dyn Storage>,
}

impl OrderHistory {
    /// Load the persisted history. Unreadable records are skipped but preserved.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let stored: Vec<Value> = storage::load_or_default(&*storage, StorageKey::Orders);

        let mut orders = Vec::with_capacity(stored.len());
        let mut unreadable = Vec::new();

        for value in stored {
            let record = match OrderRecord::deserialize(&value) {
                Ok(record) => record,
                Err(error) => {
                    warn!(%error, "skipping malformed stored order");
                    unreadable.push(value);
                    continue;
                }
            };

            let id = record.id.clone();

            match Order::try_from(record) {
                Ok(order) => orders.push(order),
                Err(error) => {
                    warn!(order_id = %id, %error, "skipping stored order");
                    unreadable.push(value);
                }
            }
        }

        debug!(
            orders = orders.len(),
            unreadable = unreadable.len(),
            "loaded order history"
        );

        Self {
            orders,
            unreadable,
            latest: None,
            storage,
        }
    }

    /// Pick an order number not already in the history.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IdCollision`] if no free id was found.
    pub fn allocate_id(&self, now: Timestamp) -> Result<OrderId, OrderError> {
        let mut rng = rand::thread_rng();

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = OrderId::generate_with(now, &mut rng);

            if self.get(id.as_str()).is_none() {
                return Ok(id);
            }

            debug!(order_id = %id, "order id collision, retrying");
        }

        Err(OrderError::IdCollision)
    }

    /// Persist an order and add it to the history.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::DuplicateId`] if the id is already used, or
    /// [`OrderError::Storage`] if the history could not be written.
    pub fn append(&mut self, order: Order) -> Result<(), OrderError> {
        if self.get(order.id().as_str()).is_some() {
            return Err(OrderError::DuplicateId(order.id().clone()));
        }

        self.write(self.orders.iter().chain([&order]))?;

        info!(
            order_id = %order.id(),
            total = %order.totals().total,
            items = order.item_count(),
            "order placed"
        );

        self.latest = Some(order.id().clone());
        self.orders.push(order);

        Ok(())
    }

    /// Take back an order that was just appended.
    ///
    /// Used when the rest of an order placement fails after the order was
    /// stored. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the history could not be written. The
    /// order stays in the history in that case.
    pub fn withdraw(&mut self, id: &OrderId) -> Result<(), OrderError> {
        if self.get(id.as_str()).is_none() {
            return Ok(());
        }

        self.write(self.orders.iter().filter(|order| order.id() != id))?;

        warn!(order_id = %id, "order withdrawn");

        self.orders.retain(|order| order.id() != id);

        if self.latest.as_ref() == Some(id) {
            self.latest = None;
        }

        Ok(())
    }

    /// Look up an order by number.
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id().as_str() == id)
    }

    /// Every order, oldest first.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    /// The order most recently placed through this history.
    pub fn latest(&self) -> Option<&Order> {
        self.latest.as_ref().and_then(|id| self.get(id.as_str()))
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders have been placed.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn write<'a>(&self, orders: impl Iterator<Item = &'a Order>) -> Result<(), StorageError> {
        let mut stored = self.unreadable.clone();

        for order in orders {
            let value = serde_json::to_value(OrderRecord::from(order)).map_err(|source| {
                StorageError::Encode {
                    key: StorageKey::Orders,
                    source,
                }
            })?;

            stored.push(value);
        }

        storage::save(&*self.storage, StorageKey::Orders, &stored)
    }
}
