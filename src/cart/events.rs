//! Cart change notifications

use std::{
    fmt::Debug,
    sync::{Mutex, PoisonError},
};

use crate::products::ProductId;

/// A change made to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was created.
    LineAdded {
        /// Product on the new line
        product_id: ProductId,
        /// Quantity on the new line
        quantity: u32,
    },

    /// An existing line's quantity changed.
    QuantityChanged {
        /// Product on the line
        product_id: ProductId,
        /// The line's new quantity
        quantity: u32,
    },

    /// A line was removed.
    LineRemoved {
        /// Product on the removed line
        product_id: ProductId,
    },

    /// Every line was removed.
    Cleared,

    /// The cart drawer was opened or closed.
    OpenChanged {
        /// Whether the cart is now open
        open: bool,
    },
}

/// Receives cart change notifications.
pub trait CartObserver: Debug + Send + Sync {
    /// Called after each cart mutation has been applied.
    fn on_cart_event(&self, event: &CartEvent);
}

/// Observer that keeps every event it sees.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CartEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<CartEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl CartObserver for RecordingObserver {
    fn on_cart_event(&self, event: &CartEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
