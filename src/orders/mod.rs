//! Orders

use thiserror::Error;

use crate::{pricing::PricingError, storage::StorageError};

pub mod history;
pub mod ids;
pub mod models;
mod records;

pub use history::OrderHistory;
pub use ids::OrderId;
pub use models::{NewOrder, Order, OrderLine, OrderStatus};

/// Errors from creating and storing orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order history could not be written.
    #[error("failed to save order history")]
    Storage(#[from] StorageError),

    /// An order with this number already exists.
    #[error("order {0} already exists")]
    DuplicateId(OrderId),

    /// No unused order number could be generated.
    #[error("could not allocate a unique order id")]
    IdCollision,

    /// Order amounts could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The delivery estimate fell outside the supported time range.
    #[error("invalid order timestamp")]
    Timestamp(#[from] jiff::Error),
}
