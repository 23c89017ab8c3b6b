//! Order Records
//!
//! Persisted form of orders. Amounts are stored as minor units next to the
//! order's ISO currency code.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    checkout::{MaskedPayment, ShippingInfo},
    pricing::{OrderTotals, PricingError, parse_currency},
    products::ProductId,
};

use super::{NewOrder, Order, OrderId, OrderLine, OrderStatus};

/// Order Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderRecord {
    pub id: OrderId,
    pub created_at: Timestamp,
    pub estimated_delivery: Timestamp,
    pub currency: String,
    pub items: Vec<OrderLineRecord>,
    pub shipping: ShippingInfo,
    pub payment: MaskedPayment,
    #[serde(default)]
    pub status: OrderStatus,
    pub subtotal: i64,
    pub tax: i64,
    pub shipping_fee: i64,
    pub total: i64,
}

/// Order Line Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderLineRecord {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: i64,
    pub quantity: u32,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        let totals = order.totals();

        Self {
            id: order.id().clone(),
            created_at: order.created_at(),
            estimated_delivery: order.estimated_delivery(),
            currency: totals.total.currency().iso_alpha_code.to_string(),
            items: order
                .lines()
                .iter()
                .map(|line| OrderLineRecord {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    image: line.image.clone(),
                    price: line.unit_price.to_minor_units(),
                    quantity: line.quantity,
                })
                .collect(),
            shipping: order.shipping().clone(),
            payment: order.payment().clone(),
            status: order.status(),
            subtotal: totals.subtotal.to_minor_units(),
            tax: totals.tax.to_minor_units(),
            shipping_fee: totals.shipping.to_minor_units(),
            total: totals.total.to_minor_units(),
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = PricingError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let currency: &'static Currency = parse_currency(&record.currency)?;

        let lines = record
            .items
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                name: item.name,
                image: item.image,
                unit_price: Money::from_minor(item.price, currency),
                quantity: item.quantity,
            })
            .collect();

        Ok(NewOrder {
            id: record.id,
            created_at: record.created_at,
            estimated_delivery: record.estimated_delivery,
            lines,
            shipping: record.shipping,
            payment: record.payment,
            status: record.status,
            totals: OrderTotals {
                subtotal: Money::from_minor(record.subtotal, currency),
                tax: Money::from_minor(record.tax, currency),
                shipping: Money::from_minor(record.shipping_fee, currency),
                total: Money::from_minor(record.total, currency),
            },
        }
        .into())
    }
}
