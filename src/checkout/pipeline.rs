//! Checkout pipeline
//!
//! A checkout moves through `Cart -> Shipping -> Payment -> Review -> Complete`.
//! Each forward step validates what it was given; `back` steps one stage
//! towards the cart and keeps whatever was captured. `Complete` is terminal.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, error, info, warn};

use crate::{
    cart::CartStore,
    orders::{NewOrder, OrderError, OrderHistory, OrderId, OrderLine, OrderStatus},
};

use super::{CheckoutError, PaymentInfo, ShippingInfo};

/// Orders are expected to arrive a week after they are placed.
pub const DEFAULT_DELIVERY_WINDOW: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Stage of a checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Reviewing the cart
    #[default]
    Cart,

    /// Entering shipping details
    Shipping,

    /// Entering payment details
    Payment,

    /// Reviewing the order before placing it
    Review,

    /// Order placed
    Complete,
}

impl CheckoutStage {
    /// Lowercase stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pass through checkout. Start a new one for each order.
#[derive(Debug, Clone)]
pub struct Checkout {
    stage: CheckoutStage,
    shipping: Option<ShippingInfo>,
    payment: Option<PaymentInfo>,
    order_id: Option<OrderId>,
    delivery_window: SignedDuration,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkout {
    /// Start a checkout at the cart stage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::Cart,
            shipping: None,
            payment: None,
            order_id: None,
            delivery_window: DEFAULT_DELIVERY_WINDOW,
        }
    }

    /// Use a different delivery estimate for the order.
    #[must_use]
    pub fn with_delivery_window(mut self, window: SignedDuration) -> Self {
        self.delivery_window = window;
        self
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Captured shipping details, if any.
    #[must_use]
    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    /// Captured payment details, if any.
    #[must_use]
    pub fn payment(&self) -> Option<&PaymentInfo> {
        self.payment.as_ref()
    }

    /// Number of the order this checkout placed.
    #[must_use]
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Leave the cart stage.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, or a
    /// transition error outside the cart stage.
    pub fn begin(&mut self, cart: &CartStore) -> Result<(), CheckoutError> {
        self.expect_stage(CheckoutStage::Cart, "begin checkout")?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.advance(CheckoutStage::Shipping);

        Ok(())
    }

    /// Capture shipping details and move on to payment.
    ///
    /// Invalid details are kept so the form can be corrected, and the flow stays
    /// at the shipping stage.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Shipping`] with every failed field, or a
    /// transition error outside the shipping stage.
    pub fn submit_shipping(&mut self, shipping: ShippingInfo) -> Result<(), CheckoutError> {
        self.expect_stage(CheckoutStage::Shipping, "submit shipping details")?;

        let result = shipping.validate();
        self.shipping = Some(shipping);
        result.map_err(CheckoutError::Shipping)?;

        self.advance(CheckoutStage::Payment);

        Ok(())
    }

    /// Capture payment details and move on to review.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Payment`] with every failed field, or a
    /// transition error outside the payment stage.
    pub fn submit_payment(&mut self, payment: PaymentInfo) -> Result<(), CheckoutError> {
        self.expect_stage(CheckoutStage::Payment, "submit payment details")?;

        let result = payment.validate();
        self.payment = Some(payment);
        result.map_err(CheckoutError::Payment)?;

        self.advance(CheckoutStage::Review);

        Ok(())
    }

    /// Step back one stage, keeping captured details.
    ///
    /// # Errors
    ///
    /// Returns a transition error at the cart stage and
    /// [`CheckoutError::AlreadyComplete`] once the order is placed.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        let previous = match self.stage {
            CheckoutStage::Shipping => CheckoutStage::Cart,
            CheckoutStage::Payment => CheckoutStage::Shipping,
            CheckoutStage::Review => CheckoutStage::Payment,
            CheckoutStage::Complete => return Err(CheckoutError::AlreadyComplete),
            CheckoutStage::Cart => {
                return Err(CheckoutError::InvalidTransition {
                    stage: self.stage,
                    action: "go back",
                });
            }
        };

        self.advance(previous);

        Ok(())
    }

    /// Place the order using the current time.
    ///
    /// # Errors
    ///
    /// See [`Checkout::place_order_at`].
    pub fn place_order(
        &mut self,
        cart: &mut CartStore,
        history: &mut OrderHistory,
    ) -> Result<OrderId, CheckoutError> {
        self.place_order_at(Timestamp::now(), cart, history)
    }

    /// Turn the cart into an order placed at `now`.
    ///
    /// The order is written to the history before the cart is cleared. If
    /// clearing the stored cart fails the order is withdrawn again, so the cart
    /// and the history are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] (and returns to the cart stage) if
    /// the cart was emptied since checkout began. Missing or invalid details,
    /// pricing failures and storage failures leave the flow at review.
    pub fn place_order_at(
        &mut self,
        now: Timestamp,
        cart: &mut CartStore,
        history: &mut OrderHistory,
    ) -> Result<OrderId, CheckoutError> {
        self.expect_stage(CheckoutStage::Review, "place an order")?;

        let shipping = self.shipping.as_ref().ok_or(CheckoutError::MissingShipping)?;
        shipping.validate().map_err(CheckoutError::Shipping)?;

        let payment = self.payment.as_ref().ok_or(CheckoutError::MissingPayment)?;
        payment.validate().map_err(CheckoutError::Payment)?;

        if cart.is_empty() {
            warn!("cart emptied before the order was placed");
            self.advance(CheckoutStage::Cart);

            return Err(CheckoutError::EmptyCart);
        }

        let lines: Vec<OrderLine> = cart
            .priced_lines()?
            .into_iter()
            .map(|line| OrderLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                image: line.product.image.clone(),
                unit_price: line.product.price,
                quantity: line.quantity,
            })
            .collect();

        let totals = cart.totals()?;
        let id = history.allocate_id(now)?;
        let estimated_delivery = now
            .checked_add(self.delivery_window)
            .map_err(OrderError::from)?;

        history.append(
            NewOrder {
                id: id.clone(),
                created_at: now,
                estimated_delivery,
                lines,
                shipping: shipping.clone(),
                payment: payment.masked(),
                status: OrderStatus::Processing,
                totals,
            }
            .into(),
        )?;

        if let Err(error) = cart.try_clear() {
            if let Err(withdraw_error) = history.withdraw(&id) {
                error!(order_id = %id, error = %withdraw_error, "failed to withdraw order");
            }

            return Err(CheckoutError::Cart(error));
        }

        info!(order_id = %id, "checkout complete");

        self.payment = None;
        self.order_id = Some(id.clone());
        self.advance(CheckoutStage::Complete);

        Ok(id)
    }

    fn expect_stage(
        &self,
        expected: CheckoutStage,
        action: &'static str,
    ) -> Result<(), CheckoutError> {
        match self.stage {
            stage if stage == expected => Ok(()),
            CheckoutStage::Complete => Err(CheckoutError::AlreadyComplete),
            stage => Err(CheckoutError::InvalidTransition { stage, action }),
        }
    }

    fn advance(&mut self, stage: CheckoutStage) {
        debug!(from = %self.stage, to = %stage, "checkout stage changed");
        self.stage = stage;
    }
}
