//! Receipt
//!
//! Table rendering for catalog listings, cart summaries and placed orders.

use std::{io, sync::Arc};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::PricedLine,
    orders::Order,
    pricing::{OrderTotals, PricingError},
    products::Product,
};

/// Errors that can occur when rendering tables.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),

    /// A line total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Write a product listing.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if the output cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[Arc<Product>]) -> Result<(), ReceiptError> {
    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Price", "Rating", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            format!("{:.1}", product.rating),
            if product.in_stock { "in stock" } else { "sold out" }.to_string(),
        ]);
    }

    write_table(&mut out, builder, 3..5)
}

/// Write the cart lines followed by the order summary.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if the output cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    lines: &[PricedLine],
    totals: &OrderTotals,
) -> Result<(), ReceiptError> {
    if lines.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

    for (idx, line) in lines.iter().enumerate() {
        builder.push_record([
            format!("#{}", idx + 1),
            line.product.name.clone(),
            line.quantity.to_string(),
            line.product.price.to_string(),
            line.line_total.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;
    write_summary(&mut out, totals)
}

/// Write a placed order as a receipt.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a line total overflows or the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), ReceiptError> {
    let shipping = order.shipping();
    let payment = order.payment();

    writeln!(out, "Order {}", order.id())?;
    writeln!(out, "  Placed:             {}", order.created_at())?;
    writeln!(out, "  Status:             {}", order.status())?;
    writeln!(out, "  Estimated delivery: {}", order.estimated_delivery())?;
    writeln!(
        out,
        "  Ship to:            {}, {}, {} {} {}, {}",
        shipping.full_name,
        shipping.address_line1,
        shipping.city,
        shipping.state,
        shipping.postal_code,
        shipping.country
    )?;
    writeln!(
        out,
        "  Paid with:          {} ({})",
        payment.card_number, payment.cardholder_name
    )?;

    let mut builder = Builder::default();
    builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

    for (idx, line) in order.lines().iter().enumerate() {
        builder.push_record([
            format!("#{}", idx + 1),
            line.name.clone(),
            line.quantity.to_string(),
            line.unit_price.to_string(),
            line.line_total()?.to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;
    write_summary(&mut out, order.totals())
}

/// Write a one-line-per-order history listing.
///
/// # Errors
///
/// Returns [`ReceiptError::Io`] if the output cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[Order]) -> Result<(), ReceiptError> {
    if orders.is_empty() {
        writeln!(out, "No orders yet.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Placed", "Items", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            order.id().to_string(),
            order.created_at().strftime("%Y-%m-%d %H:%M").to_string(),
            order.item_count().to_string(),
            order.totals().total.to_string(),
            order.status().to_string(),
        ]);
    }

    write_table(&mut out, builder, 2..4)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(numeric_columns), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, totals: &OrderTotals) -> Result<(), ReceiptError> {
    let shipping = if totals.ships_free() {
        "Free".to_string()
    } else {
        totals.shipping.to_string()
    };

    let rows = [
        ("Subtotal:", totals.subtotal.to_string()),
        ("Tax:", totals.tax.to_string()),
        ("Shipping:", shipping),
        ("Total:", totals.total.to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}
