//! Cart commands

use std::io;

use clap::{Args, Subcommand};
use storefront::{Storefront, products::ProductId, receipt};

use super::{error_chain, say};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: Option<CartSubcommand>,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with totals
    Show,

    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },

    /// Set a product's quantity; below 1 removes it
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

pub(crate) fn run(store: &mut Storefront, command: CartCommand) -> Result<(), String> {
    match command.command.unwrap_or(CartSubcommand::Show) {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id, quantity } => {
            let product = store
                .catalog
                .get(&id)
                .ok_or_else(|| format!("unknown product: {id}"))?;

            store.cart.add_to_cart(&product, quantity);
        }
        CartSubcommand::Remove { id } => store.cart.remove_from_cart(&ProductId::new(id)),
        CartSubcommand::Update { id, quantity } => {
            store.cart.update_quantity(&ProductId::new(id), quantity);
        }
        CartSubcommand::Clear => store.cart.clear_cart(),
    }

    show(store)
}

pub(crate) fn show(store: &Storefront) -> Result<(), String> {
    let lines = store.cart.priced_lines().map_err(|error| error_chain(&error))?;
    let totals = store.cart.totals().map_err(|error| error_chain(&error))?;

    receipt::write_cart(io::stdout().lock(), &lines, &totals).map_err(|error| error_chain(&error))?;

    if !store.cart.is_empty() {
        say(format_args!("{} item(s) in cart", store.cart.cart_count()))?;
    }

    Ok(())
}
