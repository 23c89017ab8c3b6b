//! Checkout command

use std::{io, path::PathBuf};

use clap::Args;
use storefront::{
    Storefront,
    checkout::{CheckoutError, ValidationErrors},
    fixtures, receipt,
};
use tracing::info;

use super::error_chain;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// YAML file with shipping details
    #[arg(long)]
    shipping: PathBuf,

    /// YAML file with payment details
    #[arg(long)]
    payment: PathBuf,
}

pub(crate) async fn run(store: &mut Storefront, args: &CheckoutArgs) -> Result<(), String> {
    let shipping = fixtures::load_shipping(&args.shipping).map_err(|error| error_chain(&error))?;
    let payment = fixtures::load_payment(&args.payment).map_err(|error| error_chain(&error))?;

    let mut checkout = store.checkout();

    checkout.begin(&store.cart).map_err(|error| describe(&error))?;
    checkout.submit_shipping(shipping).map_err(|error| describe(&error))?;
    checkout.submit_payment(payment).map_err(|error| describe(&error))?;

    info!("submitting order");

    let id = store
        .place_order(&mut checkout)
        .await
        .map_err(|error| describe(&error))?;

    let order = store
        .orders
        .get(id.as_str())
        .ok_or_else(|| format!("order {id} was not recorded"))?;

    receipt::write_order(io::stdout().lock(), order).map_err(|error| error_chain(&error))
}

fn describe(error: &CheckoutError) -> String {
    match error {
        CheckoutError::Shipping(errors) | CheckoutError::Payment(errors) => {
            format!("{error}\n{}", field_lines(errors))
        }
        other => error_chain(other),
    }
}

fn field_lines(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| format!("  - {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}
