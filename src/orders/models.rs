//! Order Models

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    checkout::{MaskedPayment, ShippingInfo},
    pricing::{Amount, OrderTotals, PricingError, line_total},
    products::ProductId,
};

use super::OrderId;

/// Where an order is in fulfilment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed and awaiting dispatch
    #[default]
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled before delivery
    Cancelled,
}

impl OrderStatus {
    /// Lowercase status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product as it was when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Product id
    pub product_id: ProductId,

    /// Product name at order time
    pub name: String,

    /// Product image at order time
    pub image: String,

    /// Unit price at order time
    pub unit_price: Amount,

    /// Units ordered
    pub quantity: u32,
}

impl OrderLine {
    /// Unit price x quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::LineOverflow`] if the total does not fit in minor units.
    pub fn line_total(&self) -> Result<Amount, PricingError> {
        line_total(&self.unit_price, self.quantity)
    }
}

/// An immutable record of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    created_at: Timestamp,
    estimated_delivery: Timestamp,
    lines: Vec<OrderLine>,
    shipping: ShippingInfo,
    payment: MaskedPayment,
    status: OrderStatus,
    totals: OrderTotals,
}

/// Everything needed to create an [`Order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Order number
    pub id: OrderId,

    /// When the order was placed
    pub created_at: Timestamp,

    /// When the order is expected to arrive
    pub estimated_delivery: Timestamp,

    /// Snapshot of the cart lines
    pub lines: Vec<OrderLine>,

    /// Shipping details
    pub shipping: ShippingInfo,

    /// Masked payment details
    pub payment: MaskedPayment,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Subtotal, tax, shipping and total
    pub totals: OrderTotals,
}

impl From<NewOrder> for Order {
    fn from(new: NewOrder) -> Self {
        Self {
            id: new.id,
            created_at: new.created_at,
            estimated_delivery: new.estimated_delivery,
            lines: new.lines,
            shipping: new.shipping,
            payment: new.payment,
            status: new.status,
            totals: new.totals,
        }
    }
}

impl Order {
    /// Order number.
    #[must_use]
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// When the order was placed.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the order is expected to arrive.
    #[must_use]
    pub fn estimated_delivery(&self) -> Timestamp {
        self.estimated_delivery
    }

    /// Lines as they were at order time.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Shipping details.
    #[must_use]
    pub fn shipping(&self) -> &ShippingInfo {
        &self.shipping
    }

    /// Masked payment details.
    #[must_use]
    pub fn payment(&self) -> &MaskedPayment {
        &self.payment
    }

    /// Fulfilment status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Subtotal, tax, shipping and total.
    #[must_use]
    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_names_are_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&OrderStatus::Processing)?, r#""processing""#);
        assert_eq!(
            serde_json::from_str::<OrderStatus>(r#""cancelled""#)?,
            OrderStatus::Cancelled
        );
        assert_eq!(OrderStatus::Shipped.to_string(), "shipped");

        Ok(())
    }
}
