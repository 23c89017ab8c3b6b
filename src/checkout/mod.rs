//! Checkout

pub mod errors;
pub mod payment;
pub mod pipeline;
pub mod shipping;
pub mod validation;

pub use errors::CheckoutError;
pub use payment::{CardSecret, MaskedPayment, PaymentInfo, mask_card_number};
pub use pipeline::{Checkout, CheckoutStage, DEFAULT_DELIVERY_WINDOW};
pub use shipping::ShippingInfo;
pub use validation::{FieldError, ValidationErrors};
