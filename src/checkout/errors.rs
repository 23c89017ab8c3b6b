//! Checkout Errors

use thiserror::Error;

use crate::{orders::OrderError, pricing::PricingError, storage::StorageError};

use super::{CheckoutStage, ValidationErrors};

/// Errors returned by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// Shipping details have not been captured.
    #[error("shipping details are missing")]
    MissingShipping,

    /// Payment details have not been captured.
    #[error("payment details are missing")]
    MissingPayment,

    /// The action is not allowed at the current stage.
    #[error("cannot {action} during the {stage} stage")]
    InvalidTransition {
        /// Stage the flow is in
        stage: CheckoutStage,
        /// Action that was attempted
        action: &'static str,
    },

    /// The flow has already produced an order.
    #[error("checkout is already complete")]
    AlreadyComplete,

    /// Shipping details failed validation.
    #[error("invalid shipping details: {0}")]
    Shipping(ValidationErrors),

    /// Payment details failed validation.
    #[error("invalid payment details: {0}")]
    Payment(ValidationErrors),

    /// The order could not be created or stored.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The cart could not be emptied after the order was stored. The order has
    /// been withdrawn.
    #[error("failed to clear the cart, order was not placed")]
    Cart(#[source] StorageError),

    /// Cart totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}
